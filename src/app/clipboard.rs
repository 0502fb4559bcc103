//! Clipboard operations, routed by focus

use super::state::AppResult;
use super::{App, Focus, Modal};

impl App {
    pub fn handle_copy(&mut self) -> AppResult {
        let text = match self.focus {
            Focus::Editor => {
                let selected = self.input_screen.editor.selected_text();
                (!selected.is_empty()).then_some(selected)
            }
            Focus::Search => self.view.search.copy(),
            Focus::ModalName | Focus::ModalUrl => match &self.view.modal {
                Modal::AddTab(modal) => {
                    if self.focus == Focus::ModalUrl {
                        modal.url.copy()
                    } else {
                        modal.name.copy()
                    }
                }
                _ => None,
            },
            // The JSON modal copies its whole payload, selection or not.
            Focus::JsonModal => match &self.view.modal {
                Modal::Json(modal) => Some(modal.text.clone()),
                _ => None,
            },
            Focus::ModalWindowSelect => None,
        };

        if let Some(text) = text {
            if let Some(clipboard) = &mut self.clipboard {
                let _ = clipboard.set_text(text);
            }
        }
        AppResult::Ok
    }

    pub fn handle_cut(&mut self) -> AppResult {
        let text = match self.focus {
            Focus::Editor => {
                let selected = self.input_screen.editor.selected_text();
                if selected.is_empty() {
                    None
                } else {
                    self.input_screen.editor.delete_selection();
                    Some(selected)
                }
            }
            Focus::Search => {
                let cut = self.view.search.cut();
                if cut.is_some() {
                    let _ = self.apply_search();
                }
                cut
            }
            Focus::ModalName | Focus::ModalUrl => {
                let focus = self.focus;
                match &mut self.view.modal {
                    Modal::AddTab(modal) => {
                        if focus == Focus::ModalUrl {
                            modal.url.cut()
                        } else {
                            modal.name.cut()
                        }
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(text) = text {
            if let Some(clipboard) = &mut self.clipboard {
                let _ = clipboard.set_text(text);
            }
            self.ui.reset_cursor_blink();
            return AppResult::Redraw;
        }
        AppResult::Ok
    }

    pub fn handle_paste(&mut self) -> AppResult {
        let Some(clipboard) = &mut self.clipboard else {
            return AppResult::Ok;
        };
        let Ok(text) = clipboard.get_text() else {
            return AppResult::Ok;
        };
        if text.is_empty() {
            return AppResult::Ok;
        }

        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.insert_str(&text);
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.paste(&text);
                self.apply_search()
            }
            Focus::ModalName | Focus::ModalUrl => {
                let focus = self.focus;
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    if focus == Focus::ModalUrl {
                        modal.url.paste(&text);
                    } else {
                        modal.name.paste(&text);
                    }
                }
                self.ui.reset_cursor_blink();
                AppResult::Redraw
            }
            _ => AppResult::Ok,
        }
    }
}
