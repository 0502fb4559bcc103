//! Edit intents from the tree view: add window/tab, delete, select, collapse

use super::state::AppResult;
use super::{AddTabModal, App, Focus, JsonModal, Modal};
use crate::session::{CheckState, SessionError, TabRef};

impl App {
    pub fn add_window(&mut self) -> AppResult {
        match self.session.add_window() {
            Ok(_) => {
                self.clamp_tree_scroll();
                AppResult::Redraw
            }
            Err(err) => self.show_notice(err.to_string()),
        }
    }

    pub fn open_add_tab_modal(&mut self) -> AppResult {
        if !self.session.is_loaded() {
            return self.show_notice(SessionError::NoDocumentLoaded.to_string());
        }
        let window_ids = self.session.window_ids();
        if window_ids.is_empty() {
            return self.show_notice("There are no windows to add a tab to.".to_string());
        }
        self.view.modal = Modal::AddTab(AddTabModal::new(window_ids));
        self.focus = Focus::ModalWindowSelect;
        self.ui.reset_cursor_blink();
        AppResult::Redraw
    }

    /// Submit the add-tab form: delegate to the session, close the modal, and
    /// let the next projection pick the new tab up. Selection is preserved.
    pub fn submit_add_tab(&mut self) -> AppResult {
        let Modal::AddTab(modal) = &self.view.modal else {
            return AppResult::Ok;
        };
        let Some(window_id) = modal.window_ids.get(modal.selected).cloned() else {
            return AppResult::Ok;
        };
        let title = modal.name.text().to_string();
        let url = modal.url.text().to_string();

        let result = self.session.add_tab(&window_id, &title, &url);
        self.view.modal = Modal::None;
        self.focus = Focus::Search;
        match result {
            Ok(_) => {
                self.clamp_tree_scroll();
                AppResult::Redraw
            }
            // Stale target window: abort with a notice, no partial mutation.
            Err(err) => self.show_notice(err.to_string()),
        }
    }

    pub fn close_modal(&mut self) -> AppResult {
        self.view.modal = Modal::None;
        if self.focus != Focus::Editor {
            self.focus = Focus::Search;
        }
        AppResult::Redraw
    }

    /// Delete Selected: batch-delete, cascade, and re-project with an empty
    /// selection. A no-op when nothing is selected.
    pub fn delete_selected(&mut self) -> AppResult {
        if self.session.selected_count() == 0 {
            return AppResult::Ok;
        }
        match self.session.delete_selected() {
            Ok(_) => {
                self.clamp_tree_scroll();
                AppResult::Redraw
            }
            Err(err) => self.show_notice(err.to_string()),
        }
    }

    pub fn select_all(&mut self) -> AppResult {
        self.session.select_all();
        AppResult::Redraw
    }

    pub fn select_none(&mut self) -> AppResult {
        self.session.select_none();
        AppResult::Redraw
    }

    pub fn expand_all(&mut self) -> AppResult {
        self.view.collapse.expand_all();
        self.clamp_tree_scroll();
        AppResult::Redraw
    }

    pub fn collapse_all(&mut self) -> AppResult {
        if let Some(tree) = self.session.project() {
            self.view.collapse.collapse_all(&tree);
        }
        self.clamp_tree_scroll();
        AppResult::Redraw
    }

    // =========================================================================
    // Tree hit reactions
    // =========================================================================

    pub fn toggle_window_collapsed(&mut self, window_id: &str) -> AppResult {
        self.view.collapse.toggle_window(window_id);
        self.clamp_tree_scroll();
        AppResult::Redraw
    }

    pub fn toggle_group_collapsed(&mut self, window_id: &str, group_id: &str) -> AppResult {
        self.view.collapse.toggle_group(window_id, group_id);
        self.clamp_tree_scroll();
        AppResult::Redraw
    }

    pub fn toggle_tab_checkbox(&mut self, tab_ref: TabRef) -> AppResult {
        self.session.toggle_tab(tab_ref);
        AppResult::Redraw
    }

    /// A window checkbox click: a fully-checked header deselects its rendered
    /// tabs, anything else selects them.
    pub fn toggle_window_checkbox(&mut self, window_id: &str) -> AppResult {
        let Some(tree) = self.session.project() else {
            return AppResult::Ok;
        };
        let checked = tree
            .windows
            .iter()
            .find(|win| win.id == window_id)
            .map(|win| win.check == CheckState::Checked)
            .unwrap_or(false);
        self.session.set_window_selected(window_id, !checked);
        AppResult::Redraw
    }

    pub fn toggle_group_checkbox(&mut self, window_id: &str, group_id: &str) -> AppResult {
        let Some(tree) = self.session.project() else {
            return AppResult::Ok;
        };
        let checked = tree
            .windows
            .iter()
            .find(|win| win.id == window_id)
            .and_then(|win| win.groups.iter().find(|group| group.id == group_id))
            .map(|group| group.check == CheckState::Checked)
            .unwrap_or(false);
        self.session
            .set_group_selected(window_id, group_id, !checked);
        AppResult::Redraw
    }

    // =========================================================================
    // Notices
    // =========================================================================

    pub(crate) fn show_notice(&mut self, text: String) -> AppResult {
        self.view.notice = Some(text);
        AppResult::Redraw
    }

    pub(crate) fn open_json_modal(&mut self) -> AppResult {
        match self.session.export_json() {
            Ok(text) => {
                let line_count = text.lines().count();
                self.view.modal = Modal::Json(JsonModal {
                    text,
                    line_count,
                    scroll_offset: 0,
                });
                self.focus = Focus::JsonModal;
                AppResult::Redraw
            }
            Err(err) => self.show_notice(err.to_string()),
        }
    }
}
