//! Input screen operations: validate-and-load, sample, file open, clear

use native_dialog::FileDialog;

use super::state::AppResult;
use super::{App, Focus, LoadProgress, Modal, Screen};
use crate::session::{Document, codec, sample};

impl App {
    /// The Load button: parse and validate the editor text. On success the
    /// cosmetic progress sequence starts; `tick` swaps the screen once it
    /// finishes. On failure nothing changes except the error text.
    pub fn validate_and_load(&mut self) -> AppResult {
        if self.input_screen.progress.is_some() {
            return AppResult::Ok;
        }

        let text = self.input_screen.editor.content();
        let text = text.trim();
        self.input_screen.error = None;

        if text.is_empty() {
            self.input_screen.error = Some("Please enter JSON data.".to_string());
            return AppResult::Redraw;
        }

        match codec::parse_session(text) {
            Ok(doc) => {
                self.input_screen.progress = Some(LoadProgress::new(doc));
            }
            Err(err) => {
                self.input_screen.error =
                    Some(format!("Error: {}. Please check your JSON format.", err));
            }
        }
        AppResult::Redraw
    }

    /// Called from `tick` when the progress sequence completes: the document
    /// replaces any prior one wholesale and the tree view starts fresh.
    pub(crate) fn finish_load(&mut self, doc: Document) {
        self.session.load(doc);
        self.input_screen.progress = None;
        // Clear the editor for next time.
        self.input_screen.editor.clear();
        self.input_screen.scroll_offset = 0;
        self.view.search.clear();
        self.view.collapse.expand_all();
        self.view.scroll_offset = 0;
        self.view.modal = Modal::None;
        self.view.notice = None;
        self.screen = Screen::Visualization;
        self.focus = Focus::Search;
        self.ui.reset_cursor_blink();
    }

    pub fn load_sample(&mut self) -> AppResult {
        self.input_screen.editor.set_text(&sample::sample_json_pretty());
        self.input_screen.scroll_offset = 0;
        self.input_screen.error = None;
        AppResult::Redraw
    }

    pub fn clear_input(&mut self) -> AppResult {
        self.input_screen.editor.clear();
        self.input_screen.scroll_offset = 0;
        self.input_screen.error = None;
        AppResult::Redraw
    }

    /// Load File: the chosen file's content replaces the editor text; the
    /// user still presses Load to validate it.
    pub fn load_file(&mut self) -> AppResult {
        let picked = FileDialog::new()
            .add_filter("JSON", &["json"])
            .show_open_single_file();
        match picked {
            Ok(Some(path)) => match std::fs::read_to_string(&path) {
                Ok(content) => {
                    self.input_screen.editor.set_text(&content);
                    self.input_screen.scroll_offset = 0;
                    self.input_screen.error = None;
                    AppResult::Redraw
                }
                Err(err) => {
                    self.input_screen.error = Some(format!("Could not read file: {}", err));
                    AppResult::Redraw
                }
            },
            _ => AppResult::Ok,
        }
    }

    /// Back to Input keeps the document but clears the active search term and
    /// selection.
    pub fn back_to_input(&mut self) -> AppResult {
        self.session.reset_view();
        self.view.search.clear();
        self.view.modal = Modal::None;
        self.view.notice = None;
        self.view.scroll_offset = 0;
        self.screen = Screen::Input;
        self.focus = Focus::Editor;
        self.ui.reset_cursor_blink();
        AppResult::Redraw
    }
}
