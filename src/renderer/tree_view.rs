//! Visualization screen painting: toolbar, search, stats, and the session tree

use crate::config::{layout, rendering};
use crate::session::project::TabNode;
use crate::ui::{Rect, TreeRow};

use super::{Painter, VisualizationScene};

pub(crate) struct TreeViewRenderer<'a, 'p> {
    painter: &'a mut Painter<'p>,
    width: f32,
    height: f32,
}

impl<'a, 'p> TreeViewRenderer<'a, 'p> {
    pub fn new(painter: &'a mut Painter<'p>, width: f32, height: f32) -> Self {
        Self {
            painter,
            width,
            height,
        }
    }

    pub fn draw(&mut self, scene: &VisualizationScene<'_>) {
        self.painter.draw_button_row(scene.toolbar, scene.hovered_button);
        self.painter.draw_text_input(
            scene.search,
            scene.search_rect,
            "Search tabs by title or URL...",
            scene.search_focused,
            scene.cursor_visible,
        );
        self.draw_stats(scene);
        self.draw_rows(scene);
        if let Some(notice) = scene.notice {
            self.draw_notice(notice);
        }
    }

    fn draw_stats(&mut self, scene: &VisualizationScene<'_>) {
        let scale = self.painter.scale;
        let stats = scene.stats;
        let y = (layout::TOOLBAR_HEIGHT + layout::SEARCH_BAR_HEIGHT) * scale
            + layout::STATS_HEIGHT * scale * 0.7;

        let shown = if scene.searching {
            stats.matched_tabs
        } else {
            stats.total_tabs
        };
        let mut line = format!(
            "Displaying {} in {}",
            plural(shown, "tab"),
            plural(stats.windows_rendered, "window")
        );
        if stats.selected_tabs > 0 {
            line.push_str(&format!(" ({} selected)", stats.selected_tabs));
        }
        let color = self.painter.theme.fg_dim;
        self.painter
            .text(layout::PADDING * scale, y, &line, rendering::SMALL_FONT_SIZE, color);

        if scene.searching {
            let found = format!(
                "Found {} matching tabs out of {} total tabs",
                stats.matched_tabs, stats.total_tabs
            );
            let width = self.painter.text_width(&found, rendering::SMALL_FONT_SIZE);
            let accent = self.painter.theme.accent;
            self.painter.text(
                self.width - layout::PADDING * scale - width,
                y,
                &found,
                rendering::SMALL_FONT_SIZE,
                accent,
            );
        }
    }

    fn draw_rows(&mut self, scene: &VisualizationScene<'_>) {
        let view = scene.tree_view;
        let scale = self.painter.scale;

        // Empty windows still render under a no-match search, so only show
        // the no-results message alone when there is nothing at all to draw.
        if scene.no_results && scene.rows.is_empty() {
            let message = "No tabs match your search.";
            let width = self.painter.text_width(message, rendering::CONTENT_FONT_SIZE);
            let color = self.painter.theme.fg_dim;
            self.painter.text(
                (self.width - width) / 2.0,
                view.area.y + 60.0 * scale,
                message,
                rendering::CONTENT_FONT_SIZE,
                color,
            );
            return;
        }

        self.painter.canvas.save();
        self.painter.canvas.intersect_scissor(
            view.area.x,
            view.area.y,
            view.area.width,
            view.area.height,
        );

        let visible = view.visible_rows() + 1;
        for visible_idx in 0..visible {
            let Some(row) = scene.rows.get(scene.scroll_offset + visible_idx) else {
                break;
            };
            let row_rect = view.row_rect(visible_idx);
            let hovered = scene.hovered_row == Some(scene.scroll_offset + visible_idx);
            match row {
                TreeRow::Window { node, collapsed } => {
                    self.draw_window_row(scene, row_rect, node, *collapsed, hovered);
                }
                TreeRow::Group { node, collapsed, .. } => {
                    self.draw_group_row(scene, row_rect, node, *collapsed, hovered);
                }
                TreeRow::Tab(tab) => {
                    self.draw_tab_row(scene, row_rect, tab, hovered);
                }
            }
        }

        self.painter.canvas.restore();

        self.painter.draw_scrollbar(
            view.area,
            scene.rows.len(),
            view.visible_rows(),
            scene.scroll_offset,
            scene.scrollbar_hovered,
            scene.scrollbar_dragging,
        );
    }

    fn draw_window_row(
        &mut self,
        scene: &VisualizationScene<'_>,
        row_rect: Rect,
        node: &crate::session::project::WindowNode,
        collapsed: bool,
        hovered: bool,
    ) {
        let scale = self.painter.scale;
        let view = scene.tree_view;
        let bg = if hovered {
            self.painter.theme.row_hover
        } else {
            self.painter.theme.window_color(node.color)
        };
        self.painter.fill_rect(row_rect, bg);

        let checkbox = view.checkbox_rect(row_rect, 0);
        self.painter.draw_checkbox(checkbox, node.check);

        let text_x = checkbox.x + checkbox.width + 10.0 * scale;
        let text_y = row_rect.y + row_rect.height * 0.72;
        let label = format!("Window {} (ID: {})", node.ordinal, node.id);
        // A window with no rendered tabs shows a muted header; it exists only
        // as an add-tab target.
        let color = if node.visible_tab_count() == 0 {
            self.painter.theme.fg_dim
        } else {
            self.painter.theme.fg
        };
        self.painter
            .text(text_x, text_y, &label, rendering::UI_FONT_SIZE, color);

        let count = format!("({})", plural(node.tab_count, "tab"));
        let label_width = self.painter.text_width(&label, rendering::UI_FONT_SIZE);
        let dim = self.painter.theme.fg_dim;
        self.painter.text(
            text_x + label_width + 8.0 * scale,
            text_y,
            &count,
            rendering::SMALL_FONT_SIZE,
            dim,
        );

        self.painter.draw_chevron(
            row_rect.x + row_rect.width - layout::PADDING * scale - 8.0 * scale,
            row_rect.y + row_rect.height / 2.0,
            collapsed,
        );
    }

    fn draw_group_row(
        &mut self,
        scene: &VisualizationScene<'_>,
        row_rect: Rect,
        node: &crate::session::project::GroupNode,
        collapsed: bool,
        hovered: bool,
    ) {
        let scale = self.painter.scale;
        let view = scene.tree_view;
        let indent = view.indent_x(1);
        let band = Rect {
            x: indent - 6.0 * scale,
            y: row_rect.y,
            width: row_rect.width - indent - layout::PADDING * scale + 6.0 * scale,
            height: row_rect.height,
        };
        let bg = if hovered {
            self.painter.theme.row_hover
        } else {
            self.painter.theme.group_color(node.color)
        };
        self.painter.fill_rect(band, bg);

        let checkbox = view.checkbox_rect(row_rect, 1);
        self.painter.draw_checkbox(checkbox, node.check);

        let text_x = checkbox.x + checkbox.width + 10.0 * scale;
        let text_y = row_rect.y + row_rect.height * 0.72;
        let label = format!("Group (ID: {})", node.id);
        let fg = self.painter.theme.fg;
        self.painter
            .text(text_x, text_y, &label, rendering::UI_FONT_SIZE, fg);

        self.painter.draw_chevron(
            band.x + band.width - 14.0 * scale,
            row_rect.y + row_rect.height / 2.0,
            collapsed,
        );
    }

    fn draw_tab_row(
        &mut self,
        scene: &VisualizationScene<'_>,
        row_rect: Rect,
        tab: &TabNode,
        hovered: bool,
    ) {
        let scale = self.painter.scale;
        let view = scene.tree_view;
        let depth = if tab.grouped { 2 } else { 1 };
        let indent = view.indent_x(depth);

        let band = Rect {
            x: indent - 6.0 * scale,
            y: row_rect.y + 1.0 * scale,
            width: row_rect.width - indent - layout::PADDING * scale + 6.0 * scale,
            height: row_rect.height - 2.0 * scale,
        };
        let bg = if tab.selected {
            self.painter.theme.row_selected
        } else if hovered {
            self.painter.theme.row_hover
        } else {
            self.painter.theme.row_bg
        };
        self.painter.fill_rect(band, bg);

        let checkbox = view.checkbox_rect(row_rect, depth);
        let check = if tab.selected {
            crate::session::CheckState::Checked
        } else {
            crate::session::CheckState::Unchecked
        };
        self.painter.draw_checkbox(checkbox, check);

        let char_width = self.painter.char_width(rendering::CONTENT_FONT_SIZE);
        let text_y = row_rect.y + row_rect.height * 0.72;

        // Column split: title, then URL, then a right-aligned timestamp.
        let text_x = checkbox.x + checkbox.width + 10.0 * scale;
        let right_edge = band.x + band.width - 8.0 * scale;
        let stamp_width = self
            .painter
            .text_width(&tab.timestamp, rendering::SMALL_FONT_SIZE);
        let text_space = (right_edge - stamp_width - 16.0 * scale - text_x).max(0.0);
        let title_width = text_space * 0.5;
        let url_x = text_x + title_width + 12.0 * scale;

        self.draw_highlighted(
            text_x,
            text_y,
            title_width,
            &tab.title,
            &tab.title_highlights,
            char_width,
            self.painter.theme.fg,
            row_rect,
        );
        // Hovering reveals the full URL in place of the truncated form.
        let (url_text, url_highlights): (&str, &[(usize, usize)]) =
            if hovered && !tab.full_url.is_empty() {
                (&tab.full_url, &[])
            } else {
                (&tab.url, &tab.url_highlights)
            };
        self.draw_highlighted(
            url_x,
            text_y,
            text_space - title_width - 12.0 * scale,
            url_text,
            url_highlights,
            char_width,
            self.painter.theme.accent,
            row_rect,
        );

        if !tab.timestamp.is_empty() {
            let dim = self.painter.theme.fg_dim;
            self.painter.text(
                right_edge - stamp_width,
                text_y,
                &tab.timestamp,
                rendering::SMALL_FONT_SIZE,
                dim,
            );
        }
    }

    /// Text with highlight boxes painted behind the matched spans. The boxes
    /// sit behind the glyphs, so the text itself is never rewritten.
    #[allow(clippy::too_many_arguments)]
    fn draw_highlighted(
        &mut self,
        x: f32,
        y: f32,
        max_width: f32,
        text: &str,
        highlights: &[(usize, usize)],
        char_width: f32,
        color: (f32, f32, f32),
        row_rect: Rect,
    ) {
        if max_width <= 0.0 {
            return;
        }
        self.painter.canvas.save();
        self.painter
            .canvas
            .intersect_scissor(x, row_rect.y, max_width, row_rect.height);

        let highlight = self.painter.theme.highlight;
        for (start, end) in highlights {
            let prefix = text[..*start].chars().count() as f32;
            let span = text[*start..*end].chars().count() as f32;
            self.painter.fill_rect(
                Rect {
                    x: x + prefix * char_width,
                    y: row_rect.y + 3.0 * self.painter.scale,
                    width: span * char_width,
                    height: row_rect.height - 6.0 * self.painter.scale,
                },
                highlight,
            );
        }

        self.painter
            .text(x, y, text, rendering::CONTENT_FONT_SIZE, color);
        self.painter.canvas.restore();
    }

    fn draw_notice(&mut self, notice: &str) {
        let scale = self.painter.scale;
        let bar_height = 30.0 * scale;
        let bar = Rect {
            x: 0.0,
            y: self.height - bar_height,
            width: self.width,
            height: bar_height,
        };
        let bg = self.painter.theme.button_bg;
        self.painter.fill_rect(bar, bg);
        let fg = self.painter.theme.fg;
        self.painter.text(
            layout::PADDING * scale,
            bar.y + bar_height * 0.68,
            notice,
            rendering::UI_FONT_SIZE,
            fg,
        );
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
