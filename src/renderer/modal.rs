//! Modal overlay painting: add-tab dialog and JSON export dialog

use crate::app::Focus;
use crate::config::{layout, rendering};
use crate::ui::Rect;

use super::{ModalScene, Painter, VisualizationScene};

pub(crate) struct ModalRenderer<'a, 'p> {
    painter: &'a mut Painter<'p>,
    width: f32,
    height: f32,
}

impl<'a, 'p> ModalRenderer<'a, 'p> {
    pub fn new(painter: &'a mut Painter<'p>, width: f32, height: f32) -> Self {
        Self {
            painter,
            width,
            height,
        }
    }

    pub fn draw(&mut self, modal: &ModalScene<'_>, scene: &VisualizationScene<'_>) {
        self.draw_backdrop();
        match modal {
            ModalScene::AddTab {
                layout,
                modal,
                focus,
            } => self.draw_add_tab(layout, modal, *focus, scene.cursor_visible, scene.hovered_button),
            ModalScene::Json { layout, modal } => self.draw_json(layout, modal, scene.hovered_button),
        }
    }

    fn draw_backdrop(&mut self) {
        let alpha = self.painter.theme.backdrop_alpha;
        self.painter.fill_rect_alpha(
            Rect {
                x: 0.0,
                y: 0.0,
                width: self.width,
                height: self.height,
            },
            (0.0, 0.0, 0.0),
            alpha,
        );
    }

    fn panel(&mut self, rect: Rect, title: &str) {
        let scale = self.painter.scale;
        let bg = self.painter.theme.bg;
        self.painter.rounded_rect(rect, 8.0 * scale, bg);
        let border = self.painter.theme.border;
        self.painter.stroke_rect(rect, border, 1.0 * scale);
        let fg = self.painter.theme.fg;
        self.painter.text(
            rect.x + layout::PADDING * scale,
            rect.y + 16.0 * scale,
            title,
            rendering::UI_FONT_SIZE,
            fg,
        );
    }

    fn draw_add_tab(
        &mut self,
        modal_layout: &crate::ui::AddTabLayout,
        modal: &crate::app::AddTabModal,
        focus: Focus,
        cursor_visible: bool,
        hovered_button: Option<crate::ui::ButtonId>,
    ) {
        let scale = self.painter.scale;
        self.panel(modal_layout.panel, "Add New Tab");

        // Window selector.
        self.field_label(modal_layout.select_area, "Window:");
        let select_bg = self.painter.theme.row_bg;
        self.painter
            .rounded_rect(modal_layout.select_area, 4.0 * scale, select_bg);
        let select_border = if focus == Focus::ModalWindowSelect {
            self.painter.theme.accent
        } else {
            self.painter.theme.border
        };
        self.painter
            .stroke_rect(modal_layout.select_area, select_border, 1.0 * scale);

        let item_height = modal_layout.item_height;
        for visible_idx in 0..modal_layout.visible_items {
            let Some(window_id) = modal.window_ids.get(modal.scroll_offset + visible_idx) else {
                break;
            };
            let item_rect = Rect {
                x: modal_layout.select_area.x,
                y: modal_layout.select_area.y + visible_idx as f32 * item_height,
                width: modal_layout.select_area.width,
                height: item_height,
            };
            let is_selected = modal.scroll_offset + visible_idx == modal.selected;
            if is_selected {
                let selected_bg = self.painter.theme.row_selected;
                self.painter.fill_rect(item_rect, selected_bg);
            }
            let fg = self.painter.theme.fg;
            self.painter.text(
                item_rect.x + layout::FIELD_INNER_PAD * scale,
                item_rect.y + item_height * 0.68,
                &format!("Window {}", window_id),
                rendering::CONTENT_FONT_SIZE,
                fg,
            );
        }

        // Title and URL fields.
        self.field_label(modal_layout.name_field, "Title:");
        self.painter.draw_text_input(
            &modal.name,
            modal_layout.name_field,
            "",
            focus == Focus::ModalName,
            cursor_visible,
        );
        self.field_label(modal_layout.url_field, "URL:");
        self.painter.draw_text_input(
            &modal.url,
            modal_layout.url_field,
            "https://",
            focus == Focus::ModalUrl,
            cursor_visible,
        );

        self.painter.draw_button_row(&modal_layout.buttons, hovered_button);
    }

    fn field_label(&mut self, field: Rect, label: &str) {
        let scale = self.painter.scale;
        let dim = self.painter.theme.fg_dim;
        self.painter.text(
            field.x,
            field.y - 6.0 * scale,
            label,
            rendering::SMALL_FONT_SIZE,
            dim,
        );
    }

    fn draw_json(
        &mut self,
        modal_layout: &crate::ui::JsonModalLayout,
        modal: &crate::app::JsonModal,
        hovered_button: Option<crate::ui::ButtonId>,
    ) {
        let scale = self.painter.scale;
        self.panel(modal_layout.panel, "Current Session JSON");

        let area = modal_layout.text_area;
        let text_bg = self.painter.theme.row_bg;
        self.painter.fill_rect(area, text_bg);
        let border = self.painter.theme.border;
        self.painter.stroke_rect(area, border, 1.0 * scale);

        let line_height = layout::LINE_HEIGHT * scale;
        let pad = layout::FIELD_INNER_PAD * scale;

        self.painter.canvas.save();
        self.painter.canvas.intersect_scissor(
            area.x + 1.0,
            area.y + 1.0,
            area.width - 2.0,
            area.height - 2.0,
        );

        for (visible_idx, line) in modal
            .text
            .lines()
            .skip(modal.scroll_offset)
            .take(modal_layout.visible_lines)
            .enumerate()
        {
            let fg = self.painter.theme.fg;
            self.painter.text(
                area.x + pad,
                area.y + pad + visible_idx as f32 * line_height + line_height * 0.75,
                line,
                rendering::CONTENT_FONT_SIZE,
                fg,
            );
        }

        self.painter.canvas.restore();

        self.painter.draw_scrollbar(
            area,
            modal.line_count,
            modal_layout.visible_lines,
            modal.scroll_offset,
            false,
            false,
        );
        self.painter.draw_button_row(&modal_layout.buttons, hovered_button);
    }
}
