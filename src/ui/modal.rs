//! Modal overlay layout: add-tab dialog and JSON export dialog
//!
//! Layout lives here so the renderer and the mouse handler agree on the same
//! rects instead of duplicating the math.

use crate::config::layout;

use super::toolbar::ButtonRow;
use super::types::{ButtonId, Rect};

const LABEL_HEIGHT: f32 = 20.0;
const FIELD_GAP: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct AddTabLayout {
    pub panel: Rect,
    /// Box listing the target windows, one row per `item_height`.
    pub select_area: Rect,
    pub name_field: Rect,
    pub url_field: Rect,
    pub buttons: ButtonRow,
    pub item_height: f32,
    pub visible_items: usize,
}

impl AddTabLayout {
    pub fn compute(width: f32, height: f32, scale: f32, item_count: usize) -> Self {
        let pad = layout::PADDING * scale;
        let field_h = layout::FIELD_HEIGHT * scale;
        let label_h = LABEL_HEIGHT * scale;
        let gap = FIELD_GAP * scale;
        let item_height = field_h;
        let visible_items = item_count.clamp(1, 5);
        let list_h = visible_items as f32 * item_height;
        let buttons_h = layout::BUTTON_HEIGHT * scale;

        let panel_w = (width * 0.5).min(420.0 * scale);
        let panel_h = pad * 2.0
            + (label_h + list_h)
            + gap
            + (label_h + field_h)
            + gap
            + (label_h + field_h)
            + gap * 1.5
            + buttons_h;
        let panel = Rect {
            x: (width - panel_w) / 2.0,
            y: ((height - panel_h) / 2.0).max(40.0 * scale),
            width: panel_w,
            height: panel_h,
        };

        let inner_x = panel.x + pad;
        let inner_w = panel.width - pad * 2.0;
        let mut y = panel.y + pad + label_h;
        let select_area = Rect {
            x: inner_x,
            y,
            width: inner_w,
            height: list_h,
        };
        y += list_h + gap + label_h;
        let name_field = Rect {
            x: inner_x,
            y,
            width: inner_w,
            height: field_h,
        };
        y += field_h + gap + label_h;
        let url_field = Rect {
            x: inner_x,
            y,
            width: inner_w,
            height: field_h,
        };
        y += field_h + gap * 1.5;
        let buttons = ButtonRow::layout(
            &[(ButtonId::ModalAdd, "Add Tab"), (ButtonId::ModalCancel, "Cancel")],
            inner_x,
            y,
            scale,
        );

        Self {
            panel,
            select_area,
            name_field,
            url_field,
            buttons,
            item_height,
            visible_items,
        }
    }

    /// Which visible list row a click landed on.
    pub fn window_item_at(&self, x: f32, y: f32) -> Option<usize> {
        if !self.select_area.contains(x, y) {
            return None;
        }
        let idx = ((y - self.select_area.y) / self.item_height) as usize;
        (idx < self.visible_items).then_some(idx)
    }
}

#[derive(Debug, Clone)]
pub struct JsonModalLayout {
    pub panel: Rect,
    pub text_area: Rect,
    pub buttons: ButtonRow,
    pub visible_lines: usize,
}

impl JsonModalLayout {
    pub fn compute(width: f32, height: f32, scale: f32) -> Self {
        let pad = layout::PADDING * scale;
        let buttons_h = layout::BUTTON_HEIGHT * scale;
        let line_h = layout::LINE_HEIGHT * scale;

        let panel_w = (width * 0.7).min(640.0 * scale);
        let panel_h = (height - 120.0 * scale).max(200.0 * scale);
        let panel = Rect {
            x: (width - panel_w) / 2.0,
            y: 60.0 * scale,
            width: panel_w,
            height: panel_h,
        };

        let text_area = Rect {
            x: panel.x + pad,
            y: panel.y + pad,
            width: panel.width - pad * 2.0,
            height: panel.height - pad * 3.0 - buttons_h,
        };
        let buttons = ButtonRow::layout(
            &[
                (ButtonId::JsonCopy, "Copy to Clipboard"),
                (ButtonId::JsonDownload, "Download"),
                (ButtonId::JsonClose, "Close"),
            ],
            text_area.x,
            text_area.y + text_area.height + pad,
            scale,
        );
        let visible_lines = (text_area.height / line_h).floor().max(1.0) as usize;

        Self {
            panel,
            text_area,
            buttons,
            visible_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_tab_layout_stacks_fields() {
        let layout = AddTabLayout::compute(1000.0, 700.0, 1.0, 3);
        assert!(layout.select_area.y < layout.name_field.y);
        assert!(layout.name_field.y < layout.url_field.y);
        assert_eq!(layout.visible_items, 3);
        let hit = layout.window_item_at(
            layout.select_area.x + 5.0,
            layout.select_area.y + layout.item_height * 1.5,
        );
        assert_eq!(hit, Some(1));
        assert_eq!(layout.window_item_at(0.0, 0.0), None);
    }

    #[test]
    fn json_layout_fits_buttons_inside_panel() {
        let layout = JsonModalLayout::compute(1000.0, 700.0, 1.0);
        let last = layout.buttons.buttons.last().unwrap();
        assert!(last.rect.y + last.rect.height <= layout.panel.y + layout.panel.height + 0.5);
        assert!(layout.visible_lines > 5);
    }
}
