//! Keyboard routing, dispatched on the current focus

use super::state::AppResult;
use super::{App, Focus, Modal, Screen};

impl App {
    pub fn handle_char(&mut self, ch: char) -> AppResult {
        if ch.is_control() {
            return AppResult::Ok;
        }
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.insert(ch);
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.insert_char(ch);
                self.apply_search()
            }
            Focus::ModalName => {
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    modal.name.insert_char(ch);
                }
                self.refresh_field_scroll();
                self.ui.reset_cursor_blink();
                AppResult::Redraw
            }
            Focus::ModalUrl => {
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    modal.url.insert_char(ch);
                }
                self.refresh_field_scroll();
                self.ui.reset_cursor_blink();
                AppResult::Redraw
            }
            Focus::ModalWindowSelect | Focus::JsonModal => AppResult::Ok,
        }
    }

    pub fn handle_backspace(&mut self) -> AppResult {
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.backspace();
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.backspace();
                self.apply_search()
            }
            Focus::ModalName | Focus::ModalUrl => {
                let focus = self.focus;
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    modal_field(focus, modal).backspace();
                }
                self.refresh_field_scroll();
                AppResult::Redraw
            }
            _ => AppResult::Ok,
        }
    }

    pub fn handle_delete(&mut self) -> AppResult {
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.delete();
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.delete();
                self.apply_search()
            }
            Focus::ModalName | Focus::ModalUrl => {
                let focus = self.focus;
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    modal_field(focus, modal).delete();
                }
                AppResult::Redraw
            }
            _ => AppResult::Ok,
        }
    }

    pub fn handle_enter(&mut self) -> AppResult {
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.insert('\n');
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            focus if focus.in_add_tab_modal() => self.submit_add_tab(),
            _ => AppResult::Ok,
        }
    }

    /// Ctrl+Enter on the input screen triggers Load, like the Load button.
    pub fn handle_load_shortcut(&mut self) -> AppResult {
        if self.screen == Screen::Input {
            self.validate_and_load()
        } else {
            AppResult::Ok
        }
    }

    pub fn handle_tab_key(&mut self) -> AppResult {
        if self.focus.in_add_tab_modal() {
            self.focus = self.focus.next_modal_field();
            self.ui.reset_cursor_blink();
            return AppResult::Redraw;
        }
        if self.focus == Focus::Editor {
            self.input_screen.editor.insert_str("  ");
            self.editor_auto_scroll();
            return AppResult::Redraw;
        }
        AppResult::Ok
    }

    /// Escape: close the modal, else cancel the search, else leave the tree
    /// view. Never exits the app.
    pub fn handle_escape(&mut self) -> AppResult {
        if !matches!(self.view.modal, Modal::None) {
            return self.close_modal();
        }
        if self.screen == Screen::Visualization {
            if !self.view.search.is_empty() {
                return self.cancel_search();
            }
            return self.back_to_input();
        }
        AppResult::Ok
    }

    pub fn handle_arrow_left(&mut self, selecting: bool) -> AppResult {
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.move_left(selecting);
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.move_left(selecting);
                self.ui.reset_cursor_blink();
                AppResult::Redraw
            }
            Focus::ModalName | Focus::ModalUrl => {
                let focus = self.focus;
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    modal_field(focus, modal).move_left(selecting);
                }
                AppResult::Redraw
            }
            _ => AppResult::Ok,
        }
    }

    pub fn handle_arrow_right(&mut self, selecting: bool) -> AppResult {
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.move_right(selecting);
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.move_right(selecting);
                self.ui.reset_cursor_blink();
                AppResult::Redraw
            }
            Focus::ModalName | Focus::ModalUrl => {
                let focus = self.focus;
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    modal_field(focus, modal).move_right(selecting);
                }
                AppResult::Redraw
            }
            _ => AppResult::Ok,
        }
    }

    pub fn handle_arrow_up(&mut self, selecting: bool) -> AppResult {
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.move_up(selecting);
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::ModalWindowSelect => {
                let (width, height, scale) = (self.width, self.height, self.scale);
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    if modal.selected > 0 {
                        let target = modal.selected - 1;
                        let visible = crate::ui::AddTabLayout::compute(
                            width,
                            height,
                            scale,
                            modal.window_ids.len().max(1),
                        )
                        .visible_items;
                        modal.select(target, visible);
                    }
                }
                AppResult::Redraw
            }
            Focus::JsonModal => self.scroll_json_modal(-1),
            _ => AppResult::Ok,
        }
    }

    pub fn handle_arrow_down(&mut self, selecting: bool) -> AppResult {
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.move_down(selecting);
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::ModalWindowSelect => {
                let (width, height, scale) = (self.width, self.height, self.scale);
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    let target = modal.selected + 1;
                    let visible = crate::ui::AddTabLayout::compute(
                        width,
                        height,
                        scale,
                        modal.window_ids.len().max(1),
                    )
                    .visible_items;
                    modal.select(target, visible);
                }
                AppResult::Redraw
            }
            Focus::JsonModal => self.scroll_json_modal(1),
            _ => AppResult::Ok,
        }
    }

    pub fn handle_home(&mut self, selecting: bool, whole_buffer: bool) -> AppResult {
        match self.focus {
            Focus::Editor => {
                if whole_buffer {
                    self.input_screen.editor.move_to_start(selecting);
                } else {
                    self.input_screen.editor.move_to_line_start(selecting);
                }
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.move_to_start(selecting);
                AppResult::Redraw
            }
            _ => AppResult::Ok,
        }
    }

    pub fn handle_end(&mut self, selecting: bool, whole_buffer: bool) -> AppResult {
        match self.focus {
            Focus::Editor => {
                if whole_buffer {
                    self.input_screen.editor.move_to_end(selecting);
                } else {
                    self.input_screen.editor.move_to_line_end(selecting);
                }
                self.editor_auto_scroll();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.move_to_end(selecting);
                AppResult::Redraw
            }
            _ => AppResult::Ok,
        }
    }

    pub fn handle_select_all(&mut self) -> AppResult {
        match self.focus {
            Focus::Editor => {
                self.input_screen.editor.select_all();
                AppResult::Redraw
            }
            Focus::Search => {
                self.view.search.select_all();
                AppResult::Redraw
            }
            Focus::ModalName | Focus::ModalUrl => {
                let focus = self.focus;
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    modal_field(focus, modal).select_all();
                }
                AppResult::Redraw
            }
            _ => AppResult::Ok,
        }
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll_lines(&mut self, delta: i32) -> AppResult {
        if delta == 0 {
            return AppResult::Ok;
        }
        match (&self.view.modal, self.screen) {
            (Modal::Json(_), Screen::Visualization) => self.scroll_json_modal(delta),
            (_, Screen::Input) => {
                let visible = self.editor_visible_lines();
                let total = self.input_screen.editor.len_lines();
                let max = total.saturating_sub(visible);
                let next = add_delta(self.input_screen.scroll_offset, delta, max);
                if next != self.input_screen.scroll_offset {
                    self.input_screen.scroll_offset = next;
                    AppResult::Redraw
                } else {
                    AppResult::Ok
                }
            }
            (_, Screen::Visualization) => {
                let visible = self.tree_view().visible_rows();
                let max = self.tree_row_count().saturating_sub(visible);
                let next = add_delta(self.view.scroll_offset, delta, max);
                if next != self.view.scroll_offset {
                    self.view.scroll_offset = next;
                    AppResult::Redraw
                } else {
                    AppResult::Ok
                }
            }
        }
    }

    pub fn handle_page_up(&mut self) -> AppResult {
        let page = self.page_rows();
        self.scroll_lines(-(page as i32))
    }

    pub fn handle_page_down(&mut self) -> AppResult {
        let page = self.page_rows();
        self.scroll_lines(page as i32)
    }

    fn page_rows(&self) -> usize {
        match self.screen {
            Screen::Input => self.editor_visible_lines(),
            Screen::Visualization => self.tree_view().visible_rows(),
        }
    }

    fn scroll_json_modal(&mut self, delta: i32) -> AppResult {
        let visible = self.json_modal_layout().visible_lines;
        if let Modal::Json(modal) = &mut self.view.modal {
            let max = modal.line_count.saturating_sub(visible);
            let next = add_delta(modal.scroll_offset, delta, max);
            if next != modal.scroll_offset {
                modal.scroll_offset = next;
                return AppResult::Redraw;
            }
        }
        AppResult::Ok
    }

    // =========================================================================
    // Search plumbing
    // =========================================================================

    /// Pushes the search field's text into the session (which clears the
    /// selection on any actual change) and rewinds the tree scroll.
    pub(crate) fn apply_search(&mut self) -> AppResult {
        self.session.set_search_term(self.view.search.text());
        self.view.scroll_offset = 0;
        self.refresh_field_scroll();
        self.ui.reset_cursor_blink();
        AppResult::Redraw
    }

    /// Keep the focused single-line field's cursor horizontally in view.
    pub(crate) fn refresh_field_scroll(&mut self) {
        let char_width = self.renderer.get_char_width();
        let pad = crate::config::layout::FIELD_INNER_PAD * self.scale * 2.0;
        match self.focus {
            Focus::Search => {
                let visible = self.search_rect().width - pad;
                self.view.search.ensure_cursor_visible(visible, char_width);
            }
            Focus::ModalName | Focus::ModalUrl => {
                let (width, height, scale, focus) =
                    (self.width, self.height, self.scale, self.focus);
                if let Modal::AddTab(modal) = &mut self.view.modal {
                    let field_width = crate::ui::AddTabLayout::compute(
                        width,
                        height,
                        scale,
                        modal.window_ids.len().max(1),
                    )
                    .name_field
                    .width
                        - pad;
                    modal_field(focus, modal).ensure_cursor_visible(field_width, char_width);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn cancel_search(&mut self) -> AppResult {
        self.view.search.clear();
        self.apply_search()
    }

}

fn modal_field(focus: Focus, modal: &mut super::AddTabModal) -> &mut crate::ui::TextInput {
    if focus == Focus::ModalUrl {
        &mut modal.url
    } else {
        &mut modal.name
    }
}

fn add_delta(offset: usize, delta: i32, max: usize) -> usize {
    if delta < 0 {
        offset.saturating_sub((-delta) as usize)
    } else {
        (offset + delta as usize).min(max)
    }
}
