//! Input screen painting: JSON editor, buttons, error text, progress bar

use crate::config::{layout, rendering};
use crate::ui::Rect;

use super::{InputScene, Painter};

pub(crate) struct InputScreenRenderer<'a, 'p> {
    painter: &'a mut Painter<'p>,
    width: f32,
    height: f32,
}

impl<'a, 'p> InputScreenRenderer<'a, 'p> {
    pub fn new(painter: &'a mut Painter<'p>, width: f32, height: f32) -> Self {
        Self {
            painter,
            width,
            height,
        }
    }

    pub fn draw(&mut self, scene: &InputScene<'_>) {
        let scale = self.painter.scale;

        self.painter.draw_button_row(scene.buttons, scene.hovered_button);

        // App title at the right edge of the toolbar strip.
        let title = "Tab Triage";
        let title_width = self
            .painter
            .text_width(title, rendering::UI_FONT_SIZE);
        self.painter.text(
            self.width - layout::PADDING * scale - title_width,
            layout::TOOLBAR_HEIGHT * scale * 0.62,
            title,
            rendering::UI_FONT_SIZE,
            self.painter.theme.fg_dim,
        );

        // Status strip between the toolbar and the editor.
        let status_y = (layout::TOOLBAR_HEIGHT + layout::STATS_HEIGHT * 0.7) * scale;
        match scene.error {
            Some(error) => {
                let color = self.painter.theme.error;
                self.painter.text(
                    layout::PADDING * scale,
                    status_y,
                    error,
                    rendering::UI_FONT_SIZE,
                    color,
                );
            }
            None => {
                let color = self.painter.theme.fg_dim;
                self.painter.text(
                    layout::PADDING * scale,
                    status_y,
                    "Paste a browser session JSON export and press Load.",
                    rendering::SMALL_FONT_SIZE,
                    color,
                );
            }
        }

        self.draw_editor(scene);
        self.draw_progress(scene);
    }

    fn draw_editor(&mut self, scene: &InputScene<'_>) {
        let scale = self.painter.scale;
        let area = scene.editor_area;
        let line_height = layout::LINE_HEIGHT * scale;
        let pad = layout::FIELD_INNER_PAD * scale;

        self.painter.fill_rect(area, self.painter.theme.row_bg);
        self.painter
            .stroke_rect(area, self.painter.theme.border, 1.0 * scale);

        let char_width = self.painter.char_width(rendering::CONTENT_FONT_SIZE);
        let origin_x = area.x + pad;
        let visible_lines = (area.height / line_height).floor().max(1.0) as usize;
        let first = scene.scroll_offset;
        let editor = scene.editor;

        self.painter.canvas.save();
        self.painter.canvas.intersect_scissor(
            area.x + 1.0,
            area.y + 1.0,
            area.width - 2.0,
            area.height - 2.0,
        );

        // Selection boxes behind the text.
        if let Some(((start_line, start_col), (end_line, end_col))) =
            editor.selection_range_line_col()
        {
            for line_idx in start_line..=end_line {
                if line_idx < first || line_idx >= first + visible_lines {
                    continue;
                }
                let row_y = area.y + pad + (line_idx - first) as f32 * line_height;
                let line_len = editor.line(line_idx).chars().count();
                let from = if line_idx == start_line { start_col } else { 0 };
                let to = if line_idx == end_line {
                    end_col
                } else {
                    line_len + 1
                };
                if to > from {
                    self.painter.fill_rect(
                        Rect {
                            x: origin_x + from as f32 * char_width,
                            y: row_y,
                            width: (to - from) as f32 * char_width,
                            height: line_height,
                        },
                        self.painter.theme.selection,
                    );
                }
            }
        }

        // Visible text lines.
        for visible_idx in 0..visible_lines {
            let line_idx = first + visible_idx;
            if line_idx >= editor.len_lines() {
                break;
            }
            let text = editor.line(line_idx);
            if text.is_empty() {
                continue;
            }
            let row_y = area.y + pad + visible_idx as f32 * line_height;
            let color = self.painter.theme.fg;
            self.painter.text(
                origin_x,
                row_y + line_height * 0.75,
                &text,
                rendering::CONTENT_FONT_SIZE,
                color,
            );
        }

        // Cursor.
        if scene.cursor_visible {
            let (cursor_line, cursor_col) = editor.char_to_line_col(editor.cursor());
            if cursor_line >= first && cursor_line < first + visible_lines {
                let row_y = area.y + pad + (cursor_line - first) as f32 * line_height;
                self.painter.fill_rect(
                    Rect {
                        x: origin_x + cursor_col as f32 * char_width,
                        y: row_y,
                        width: 2.0 * scale,
                        height: line_height,
                    },
                    self.painter.theme.cursor,
                );
            }
        }

        self.painter.canvas.restore();

        self.painter.draw_scrollbar(
            area,
            editor.len_lines(),
            visible_lines,
            first,
            scene.scrollbar_hovered,
            scene.scrollbar_dragging,
        );
    }

    fn draw_progress(&mut self, scene: &InputScene<'_>) {
        let Some((fraction, detail)) = &scene.progress else {
            return;
        };
        let scale = self.painter.scale;
        let pad = layout::PADDING * scale;
        let bar_height = layout::PROGRESS_HEIGHT * scale;
        let bar_y = self.height - pad - bar_height;
        let track = Rect {
            x: pad,
            y: bar_y,
            width: self.width - pad * 2.0,
            height: bar_height,
        };
        self.painter
            .rounded_rect(track, bar_height / 2.0, self.painter.theme.border);
        self.painter.rounded_rect(
            Rect {
                width: track.width * fraction.clamp(0.0, 1.0),
                ..track
            },
            bar_height / 2.0,
            self.painter.theme.accent,
        );
        let color = self.painter.theme.fg_dim;
        self.painter.text(
            pad,
            bar_y - 6.0 * scale,
            detail,
            rendering::SMALL_FONT_SIZE,
            color,
        );
    }
}
