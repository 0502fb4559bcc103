//! Application state types

use std::time::Instant;

use crate::ui::ButtonId;

/// Result type for application actions that may trigger UI updates
#[must_use = "Handle the AppResult to ensure the UI updates correctly"]
pub enum AppResult {
    /// No action needed
    Ok,
    /// UI needs to be redrawn
    Redraw,
}

impl AppResult {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, AppResult::Redraw)
    }

    pub fn merge(self, other: AppResult) -> AppResult {
        if self.needs_redraw() || other.needs_redraw() {
            AppResult::Redraw
        } else {
            AppResult::Ok
        }
    }
}

/// Transient UI state (cursor blink, hover, scrollbar drag); nothing in here
/// touches the session document.
pub struct UiState {
    pub cursor_visible: bool,
    pub last_cursor_blink: Instant,
    pub hovered_button: Option<ButtonId>,
    pub hovered_row: Option<usize>,
    pub hovered_scrollbar: bool,
    pub is_dragging_scrollbar: bool,
    pub scrollbar_drag_offset: f32,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
            hovered_button: None,
            hovered_row: None,
            hovered_scrollbar: false,
            is_dragging_scrollbar: false,
            scrollbar_drag_offset: 0.0,
        }
    }

    /// Reset cursor blink (call after user action)
    pub fn reset_cursor_blink(&mut self) {
        self.cursor_visible = true;
        self.last_cursor_blink = Instant::now();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
