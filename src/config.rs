//! Centralized configuration constants for Tab Triage
//!
//! All magic numbers and tunable parameters should be defined here.

#![allow(dead_code)]

/// Layout constants (in logical pixels, will be scaled by DPI)
pub mod layout {
    /// Height of one tree row / editor line
    pub const LINE_HEIGHT: f32 = 26.0;
    /// Height of the toolbar strip at the top of each screen
    pub const TOOLBAR_HEIGHT: f32 = 44.0;
    /// Height of the search bar strip below the toolbar
    pub const SEARCH_BAR_HEIGHT: f32 = 36.0;
    /// Height of the stats line below the search bar
    pub const STATS_HEIGHT: f32 = 22.0;
    /// General padding around content areas
    pub const PADDING: f32 = 16.0;
    /// Horizontal padding inside a button
    pub const BUTTON_PADDING: f32 = 12.0;
    /// Gap between adjacent buttons
    pub const BUTTON_GAP: f32 = 8.0;
    /// Button height inside the toolbar
    pub const BUTTON_HEIGHT: f32 = 28.0;
    /// Checkbox square edge
    pub const CHECKBOX_SIZE: f32 = 14.0;
    /// Indent per tree depth level
    pub const TREE_INDENT: f32 = 24.0;
    /// Width of the scrollbar
    pub const SCROLLBAR_WIDTH: f32 = 12.0;
    /// Minimum scrollbar thumb height
    pub const MIN_SCROLLBAR_THUMB: f32 = 30.0;
    /// Progress bar height on the input screen
    pub const PROGRESS_HEIGHT: f32 = 10.0;
    /// Modal input field height
    pub const FIELD_HEIGHT: f32 = 32.0;
    /// Inner text padding of fields and the editor box
    pub const FIELD_INNER_PAD: f32 = 8.0;
}

/// Timing constants (in milliseconds)
pub mod timing {
    /// Cursor blink interval
    pub const CURSOR_BLINK_MS: u64 = 500;
    /// Dwell time per cosmetic loading stage
    pub const LOAD_STAGE_MS: u64 = 200;
    /// How long the full progress bar lingers before the screen switch
    pub const LOAD_FINISH_MS: u64 = 350;
}

/// Rendering constants
pub mod rendering {
    /// Fallback monospace character width (before font measurement)
    pub const FALLBACK_CHAR_WIDTH: f32 = 9.6;
    /// Default font size for content
    pub const CONTENT_FONT_SIZE: f32 = 15.0;
    /// Font size for button labels and headers
    pub const UI_FONT_SIZE: f32 = 14.0;
    /// Font size for secondary text (timestamps, stats)
    pub const SMALL_FONT_SIZE: f32 = 12.0;
}

/// Scroll behavior constants
pub mod scroll {
    /// Lines/rows to scroll per wheel tick
    pub const LINES_PER_WHEEL_TICK: usize = 3;
}
