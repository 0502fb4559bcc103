//! Button row layout and hit-testing

use crate::config::{layout, rendering};

use super::types::{ButtonId, Rect};

#[derive(Debug, Clone)]
pub struct Button {
    pub id: ButtonId,
    pub label: String,
    pub rect: Rect,
    pub danger: bool,
}

/// A horizontal run of buttons laid out left to right from `x`.
#[derive(Debug, Clone)]
pub struct ButtonRow {
    pub buttons: Vec<Button>,
}

impl ButtonRow {
    pub fn layout(specs: &[(ButtonId, &str)], x: f32, y: f32, scale: f32) -> Self {
        let height = layout::BUTTON_HEIGHT * scale;
        let padding = layout::BUTTON_PADDING * scale;
        let gap = layout::BUTTON_GAP * scale;
        let char_width = rendering::UI_FONT_SIZE * 0.6 * scale;

        let mut current_x = x;
        let mut buttons = Vec::with_capacity(specs.len());
        for (id, label) in specs {
            let width = label.chars().count() as f32 * char_width + padding * 2.0;
            buttons.push(Button {
                id: *id,
                label: (*label).to_string(),
                rect: Rect {
                    x: current_x,
                    y,
                    width,
                    height,
                },
                danger: matches!(id, ButtonId::DeleteSelected),
            });
            current_x += width + gap;
        }
        Self { buttons }
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<ButtonId> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(x, y))
            .map(|button| button.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_advances_and_hit_tests() {
        let row = ButtonRow::layout(
            &[(ButtonId::Load, "Load"), (ButtonId::Clear, "Clear")],
            10.0,
            5.0,
            1.0,
        );
        assert_eq!(row.buttons.len(), 2);
        assert!(row.buttons[1].rect.x > row.buttons[0].rect.x + row.buttons[0].rect.width);

        let first = &row.buttons[0].rect;
        assert_eq!(
            row.hit_test(first.x + 1.0, first.y + 1.0),
            Some(ButtonId::Load)
        );
        assert_eq!(row.hit_test(0.0, 0.0), None);
    }
}
