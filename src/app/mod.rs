//! Application state and coordination
//!
//! Two screens: Input (paste/load JSON) and Visualization (session tree).
//! Every user action funnels into a session-state mutation followed by one
//! full re-projection; the renderer only ever consumes the projected tree.

mod clipboard;
mod edits;
mod export;
mod focus;
mod input;
mod load;
mod mouse;
mod state;

use std::time::{Duration, Instant};

use arboard::Clipboard;

use crate::config::{layout, timing};
use crate::renderer::{ModalScene, Renderer, VisualizationScene};
use crate::session::{Document, SessionState};
use crate::text_buffer::TextBuffer;
use crate::ui::{
    AddTabLayout, ButtonId, ButtonRow, CollapseState, JsonModalLayout, Rect, TextInput, TreeView,
    build_rows,
};

pub use focus::Focus;
pub use state::AppResult;
use state::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Input,
    Visualization,
}

/// Cosmetic staged loading sequence. The document is parsed and validated up
/// front; this only animates the progress text before the screen switch.
pub struct LoadProgress {
    stage: usize,
    stage_started: Instant,
    pending: Option<Document>,
    window_count: usize,
    group_count: usize,
    tab_count: usize,
}

impl LoadProgress {
    const STAGES: usize = 6;

    fn new(doc: Document) -> Self {
        Self {
            stage: 0,
            stage_started: Instant::now(),
            window_count: doc.window_count(),
            group_count: doc.group_count(),
            tab_count: doc.total_tabs(),
            pending: Some(doc),
        }
    }

    pub fn percent(&self) -> f32 {
        match self.stage {
            0 => 0.1,
            1 => 0.3,
            2 => 0.5,
            3 => 0.7,
            4 => 0.9,
            _ => 1.0,
        }
    }

    pub fn detail(&self) -> String {
        match self.stage {
            0 => "Parsing JSON data...".to_string(),
            1 => "Validating data structure...".to_string(),
            2 => "Analyzing windows and tabs...".to_string(),
            3 => format!(
                "Found {} windows, {} groups, and {} tabs...",
                self.window_count, self.group_count, self.tab_count
            ),
            _ => "Preparing visualization...".to_string(),
        }
    }

    fn stage_duration(&self) -> Duration {
        if self.stage + 1 >= Self::STAGES {
            Duration::from_millis(timing::LOAD_FINISH_MS)
        } else {
            Duration::from_millis(timing::LOAD_STAGE_MS)
        }
    }

    /// Advances on the frame tick; yields the document once the last stage
    /// has lingered long enough.
    fn advance(&mut self) -> Option<Document> {
        if self.stage_started.elapsed() < self.stage_duration() {
            return None;
        }
        if self.stage + 1 < Self::STAGES {
            self.stage += 1;
            self.stage_started = Instant::now();
            None
        } else {
            self.pending.take()
        }
    }
}

/// Input screen state: the JSON editor plus error/progress display.
pub struct InputScreen {
    pub editor: TextBuffer,
    pub error: Option<String>,
    pub scroll_offset: usize,
    pub progress: Option<LoadProgress>,
}

impl InputScreen {
    fn new() -> Self {
        Self {
            editor: TextBuffer::new(),
            error: None,
            scroll_offset: 0,
            progress: None,
        }
    }
}

pub struct AddTabModal {
    pub window_ids: Vec<String>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub name: TextInput,
    pub url: TextInput,
}

impl AddTabModal {
    fn new(window_ids: Vec<String>) -> Self {
        Self {
            window_ids,
            selected: 0,
            scroll_offset: 0,
            name: TextInput::default(),
            url: TextInput::default(),
        }
    }

    pub fn select(&mut self, index: usize, visible_items: usize) {
        if index < self.window_ids.len() {
            self.selected = index;
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            } else if self.selected >= self.scroll_offset + visible_items {
                self.scroll_offset = self.selected + 1 - visible_items;
            }
        }
    }
}

pub struct JsonModal {
    pub text: String,
    pub line_count: usize,
    pub scroll_offset: usize,
}

pub enum Modal {
    None,
    AddTab(AddTabModal),
    Json(JsonModal),
}

/// Visualization screen state (all view-only; the document lives in the
/// session controller).
pub struct ViewScreen {
    pub search: TextInput,
    pub collapse: CollapseState,
    pub scroll_offset: usize,
    pub modal: Modal,
    pub notice: Option<String>,
}

impl ViewScreen {
    fn new() -> Self {
        Self {
            search: TextInput::default(),
            collapse: CollapseState::default(),
            scroll_offset: 0,
            modal: Modal::None,
            notice: None,
        }
    }
}

pub struct App {
    renderer: Renderer,
    session: SessionState,
    screen: Screen,
    focus: Focus,
    width: f32,
    height: f32,
    scale: f32,
    clipboard: Option<Clipboard>,
    ui: UiState,
    input_screen: InputScreen,
    view: ViewScreen,
}

impl App {
    pub fn new(
        gl_renderer: femtovg::renderer::OpenGl,
        width: f32,
        height: f32,
        scale: f32,
    ) -> Self {
        let renderer = Renderer::new(gl_renderer, width, height, scale);
        let clipboard = Clipboard::new().ok();

        Self {
            renderer,
            session: SessionState::new(),
            screen: Screen::Input,
            focus: Focus::Editor,
            width,
            height,
            scale,
            clipboard,
            ui: UiState::new(),
            input_screen: InputScreen::new(),
            view: ViewScreen::new(),
        }
    }

    // =========================================================================
    // Core lifecycle
    // =========================================================================

    pub fn tick(&mut self) -> AppResult {
        let mut needs_redraw = false;

        if self.ui.last_cursor_blink.elapsed() >= Duration::from_millis(timing::CURSOR_BLINK_MS) {
            self.ui.cursor_visible = !self.ui.cursor_visible;
            self.ui.last_cursor_blink = Instant::now();
            needs_redraw = true;
        }

        let mut finished = None;
        if let Some(progress) = &mut self.input_screen.progress {
            finished = progress.advance();
            needs_redraw = true;
        }
        if let Some(doc) = finished {
            self.finish_load(doc);
        }

        if needs_redraw {
            AppResult::Redraw
        } else {
            AppResult::Ok
        }
    }

    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.width = width;
        self.height = height;
        self.scale = scale;
        self.renderer.resize(width, height, scale);
    }

    pub fn render(&mut self) {
        match self.screen {
            Screen::Input => {
                let buttons = self.input_buttons();
                let editor_area = self.editor_area();
                self.renderer.render_input(&crate::renderer::InputScene {
                    editor: &self.input_screen.editor,
                    scroll_offset: self.input_screen.scroll_offset,
                    error: self.input_screen.error.as_deref(),
                    progress: self
                        .input_screen
                        .progress
                        .as_ref()
                        .map(|p| (p.percent(), p.detail())),
                    buttons: &buttons,
                    hovered_button: self.ui.hovered_button,
                    cursor_visible: self.ui.cursor_visible && self.focus == Focus::Editor,
                    editor_area,
                    scrollbar_hovered: self.ui.hovered_scrollbar,
                    scrollbar_dragging: self.ui.is_dragging_scrollbar,
                });
            }
            Screen::Visualization => {
                let Some(tree) = self.session.project() else {
                    // Visualization without a document cannot normally happen;
                    // fall back to the input screen.
                    self.screen = Screen::Input;
                    self.focus = Focus::Editor;
                    self.render();
                    return;
                };
                let rows = build_rows(&tree, &self.view.collapse);
                let toolbar = self.toolbar();
                let tree_view = self.tree_view();
                let search_rect = self.search_rect();
                let scroll_offset = self.view.scroll_offset.min(
                    rows.len().saturating_sub(tree_view.visible_rows()),
                );

                let modal = match &self.view.modal {
                    Modal::None => None,
                    Modal::AddTab(modal) => Some(ModalScene::AddTab {
                        layout: self.add_tab_layout(modal),
                        modal,
                        focus: self.focus,
                    }),
                    Modal::Json(modal) => Some(ModalScene::Json {
                        layout: self.json_modal_layout(),
                        modal,
                    }),
                };

                self.renderer
                    .render_visualization(&VisualizationScene {
                        rows: &rows,
                        tree_view: &tree_view,
                        scroll_offset,
                        stats: tree.stats,
                        searching: tree.searching(),
                        no_results: tree.no_results(),
                        toolbar: &toolbar,
                        search: &self.view.search,
                        search_rect,
                        search_focused: self.focus == Focus::Search,
                        cursor_visible: self.ui.cursor_visible,
                        hovered_button: self.ui.hovered_button,
                        hovered_row: self.ui.hovered_row,
                        notice: self.view.notice.as_deref(),
                        modal,
                        scrollbar_hovered: self.ui.hovered_scrollbar,
                        scrollbar_dragging: self.ui.is_dragging_scrollbar,
                    });
            }
        }
    }

    // =========================================================================
    // Layout helpers
    // =========================================================================

    pub(crate) fn input_buttons(&self) -> ButtonRow {
        ButtonRow::layout(
            &[
                (ButtonId::Load, "Load"),
                (ButtonId::LoadSample, "Load Sample"),
                (ButtonId::Clear, "Clear"),
                (ButtonId::LoadFile, "Load File"),
            ],
            layout::PADDING * self.scale,
            (layout::TOOLBAR_HEIGHT - layout::BUTTON_HEIGHT) / 2.0 * self.scale,
            self.scale,
        )
    }

    pub(crate) fn toolbar(&self) -> ButtonRow {
        ButtonRow::layout(
            &[
                (ButtonId::BackToInput, "Back"),
                (ButtonId::ExpandAll, "Expand All"),
                (ButtonId::CollapseAll, "Collapse All"),
                (ButtonId::SelectAll, "Select All"),
                (ButtonId::SelectNone, "Select None"),
                (ButtonId::DeleteSelected, "Delete Selected"),
                (ButtonId::AddWindow, "Add Window"),
                (ButtonId::AddTab, "Add Tab"),
                (ButtonId::ShowJson, "Show JSON"),
            ],
            layout::PADDING * self.scale,
            (layout::TOOLBAR_HEIGHT - layout::BUTTON_HEIGHT) / 2.0 * self.scale,
            self.scale,
        )
    }

    pub(crate) fn tree_view(&self) -> TreeView {
        TreeView::new(self.width, self.height, self.scale)
    }

    pub(crate) fn search_rect(&self) -> Rect {
        let padding = layout::PADDING * self.scale;
        Rect {
            x: padding,
            y: layout::TOOLBAR_HEIGHT * self.scale + 2.0 * self.scale,
            width: (self.width - padding * 2.0).min(420.0 * self.scale),
            height: layout::SEARCH_BAR_HEIGHT * self.scale - 6.0 * self.scale,
        }
    }

    /// The JSON editor box on the input screen.
    pub(crate) fn editor_area(&self) -> Rect {
        let padding = layout::PADDING * self.scale;
        let top = (layout::TOOLBAR_HEIGHT + layout::STATS_HEIGHT) * self.scale;
        let bottom_reserve = padding * 2.0 + layout::PROGRESS_HEIGHT * self.scale;
        Rect {
            x: padding,
            y: top,
            width: self.width - padding * 2.0,
            height: (self.height - top - bottom_reserve).max(layout::LINE_HEIGHT * self.scale),
        }
    }

    pub(crate) fn editor_visible_lines(&self) -> usize {
        (self.editor_area().height / (layout::LINE_HEIGHT * self.scale))
            .floor()
            .max(1.0) as usize
    }

    pub(crate) fn add_tab_layout(&self, modal: &AddTabModal) -> AddTabLayout {
        AddTabLayout::compute(
            self.width,
            self.height,
            self.scale,
            modal.window_ids.len().max(1),
        )
    }

    pub(crate) fn json_modal_layout(&self) -> JsonModalLayout {
        JsonModalLayout::compute(self.width, self.height, self.scale)
    }

    /// Keep the editor cursor on screen after edits and cursor motion.
    pub(crate) fn editor_auto_scroll(&mut self) {
        let visible = self.editor_visible_lines();
        let cursor_line = self.input_screen.editor.cursor_line();
        if cursor_line < self.input_screen.scroll_offset {
            self.input_screen.scroll_offset = cursor_line;
        } else if cursor_line >= self.input_screen.scroll_offset + visible {
            self.input_screen.scroll_offset = cursor_line + 1 - visible;
        }
        self.ui.reset_cursor_blink();
    }

    /// Clamp the tree scroll offset after the row count changed.
    pub(crate) fn clamp_tree_scroll(&mut self) {
        if let Some(tree) = self.session.project() {
            let rows = build_rows(&tree, &self.view.collapse);
            let visible = self.tree_view().visible_rows();
            let max = rows.len().saturating_sub(visible);
            if self.view.scroll_offset > max {
                self.view.scroll_offset = max;
            }
        }
    }

    pub(crate) fn tree_row_count(&self) -> usize {
        self.session
            .project()
            .map(|tree| build_rows(&tree, &self.view.collapse).len())
            .unwrap_or(0)
    }
}
