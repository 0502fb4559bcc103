//! Mouse routing: hover, clicks, scrollbar drags

use super::state::AppResult;
use super::{App, Focus, Modal, Screen};
use crate::config::layout;
use crate::config::layout::FIELD_INNER_PAD;
use crate::ui::{ButtonId, ScrollbarAction, ScrollbarWidget, TreeHit, build_rows};

impl App {
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) -> AppResult {
        if self.ui.is_dragging_scrollbar {
            return self.drag_scrollbar(y);
        }

        let hovered_button = match (self.screen, &self.view.modal) {
            (Screen::Input, _) => self.input_buttons().hit_test(x, y),
            (Screen::Visualization, Modal::AddTab(modal)) => {
                self.add_tab_layout(modal).buttons.hit_test(x, y)
            }
            (Screen::Visualization, Modal::Json(_)) => {
                self.json_modal_layout().buttons.hit_test(x, y)
            }
            (Screen::Visualization, Modal::None) => self.toolbar().hit_test(x, y),
        };

        let hovered_row = if self.screen == Screen::Visualization
            && matches!(self.view.modal, Modal::None)
        {
            let view = self.tree_view();
            if view.area.contains(x, y) {
                let idx = self.view.scroll_offset
                    + ((y - view.area.y) / view.row_height()).floor() as usize;
                (idx < self.tree_row_count()).then_some(idx)
            } else {
                None
            }
        } else {
            None
        };

        let hovered_scrollbar = self.active_scrollbar().hit_test(x, y);

        let changed = hovered_button != self.ui.hovered_button
            || hovered_row != self.ui.hovered_row
            || hovered_scrollbar != self.ui.hovered_scrollbar;
        self.ui.hovered_button = hovered_button;
        self.ui.hovered_row = hovered_row;
        self.ui.hovered_scrollbar = hovered_scrollbar;

        if changed {
            AppResult::Redraw
        } else {
            AppResult::Ok
        }
    }

    pub fn click_at(&mut self, x: f32, y: f32, shift: bool) -> AppResult {
        // Any click dismisses the notice bar.
        self.view.notice = None;

        match self.screen {
            Screen::Input => self.click_input(x, y, shift),
            Screen::Visualization => match &self.view.modal {
                Modal::AddTab(_) => self.click_add_tab_modal(x, y, shift),
                Modal::Json(_) => self.click_json_modal(x, y),
                Modal::None => self.click_view(x, y, shift),
            },
        }
    }

    pub fn release(&mut self) -> AppResult {
        if self.ui.is_dragging_scrollbar {
            self.ui.is_dragging_scrollbar = false;
            return AppResult::Redraw;
        }
        AppResult::Ok
    }

    // =========================================================================
    // Per-surface click handling
    // =========================================================================

    fn click_input(&mut self, x: f32, y: f32, shift: bool) -> AppResult {
        if let Some(id) = self.input_buttons().hit_test(x, y) {
            return self.press_button(id);
        }

        if let Some(action) = self.scrollbar_click(x, y) {
            return action;
        }

        let area = self.editor_area();
        if area.contains(x, y) {
            self.focus = Focus::Editor;
            let line_height = layout::LINE_HEIGHT * self.scale;
            let char_width = self.renderer.get_char_width();
            let line = self.input_screen.scroll_offset
                + ((y - area.y) / line_height).floor().max(0.0) as usize;
            let col = ((x - area.x - FIELD_INNER_PAD * self.scale) / char_width)
                .round()
                .max(0.0) as usize;
            self.input_screen.editor.set_cursor_position(line, col, shift);
            self.ui.reset_cursor_blink();
            return AppResult::Redraw;
        }

        AppResult::Ok
    }

    fn click_view(&mut self, x: f32, y: f32, shift: bool) -> AppResult {
        if let Some(id) = self.toolbar().hit_test(x, y) {
            return self.press_button(id);
        }

        let search_rect = self.search_rect();
        if search_rect.contains(x, y) {
            self.focus = Focus::Search;
            let char_width = self.renderer.get_char_width();
            let relative_x = x - search_rect.x - FIELD_INNER_PAD * self.scale;
            self.view.search.set_cursor_from_x(relative_x, char_width, shift);
            self.ui.reset_cursor_blink();
            return AppResult::Redraw;
        }

        if let Some(action) = self.scrollbar_click(x, y) {
            return action;
        }

        let hit = {
            let Some(tree) = self.session.project() else {
                return AppResult::Ok;
            };
            let rows = build_rows(&tree, &self.view.collapse);
            self.tree_view()
                .hit_test(&rows, self.view.scroll_offset, x, y)
        };

        match hit {
            TreeHit::WindowCheckbox(window_id) => self.toggle_window_checkbox(&window_id),
            TreeHit::WindowHeader(window_id) => self.toggle_window_collapsed(&window_id),
            TreeHit::GroupCheckbox {
                window_id,
                group_id,
            } => self.toggle_group_checkbox(&window_id, &group_id),
            TreeHit::GroupHeader {
                window_id,
                group_id,
            } => self.toggle_group_collapsed(&window_id, &group_id),
            TreeHit::TabCheckbox(tab_ref) => self.toggle_tab_checkbox(tab_ref),
            TreeHit::TabRow(_) | TreeHit::None => AppResult::Ok,
        }
    }

    fn click_add_tab_modal(&mut self, x: f32, y: f32, shift: bool) -> AppResult {
        let Modal::AddTab(modal_state) = &self.view.modal else {
            return AppResult::Ok;
        };
        let modal_layout = self.add_tab_layout(modal_state);
        let char_width = self.renderer.get_char_width();

        if let Some(id) = modal_layout.buttons.hit_test(x, y) {
            return self.press_button(id);
        }

        if let Some(visible_idx) = modal_layout.window_item_at(x, y) {
            let visible_items = modal_layout.visible_items;
            if let Modal::AddTab(modal) = &mut self.view.modal {
                let target = modal.scroll_offset + visible_idx;
                modal.select(target, visible_items);
            }
            self.focus = Focus::ModalWindowSelect;
            return AppResult::Redraw;
        }

        if modal_layout.name_field.contains(x, y) {
            let relative_x = x - modal_layout.name_field.x - FIELD_INNER_PAD * self.scale;
            if let Modal::AddTab(modal) = &mut self.view.modal {
                modal.name.set_cursor_from_x(relative_x, char_width, shift);
            }
            self.focus = Focus::ModalName;
            self.ui.reset_cursor_blink();
            return AppResult::Redraw;
        }

        if modal_layout.url_field.contains(x, y) {
            let relative_x = x - modal_layout.url_field.x - FIELD_INNER_PAD * self.scale;
            if let Modal::AddTab(modal) = &mut self.view.modal {
                modal.url.set_cursor_from_x(relative_x, char_width, shift);
            }
            self.focus = Focus::ModalUrl;
            self.ui.reset_cursor_blink();
            return AppResult::Redraw;
        }

        if !modal_layout.panel.contains(x, y) {
            return self.close_modal();
        }

        AppResult::Ok
    }

    fn click_json_modal(&mut self, x: f32, y: f32) -> AppResult {
        let modal_layout = self.json_modal_layout();
        if let Some(id) = modal_layout.buttons.hit_test(x, y) {
            return self.press_button(id);
        }
        if !modal_layout.panel.contains(x, y) {
            return self.close_modal();
        }
        AppResult::Ok
    }

    fn press_button(&mut self, id: ButtonId) -> AppResult {
        match id {
            ButtonId::Load => self.validate_and_load(),
            ButtonId::LoadSample => self.load_sample(),
            ButtonId::Clear => self.clear_input(),
            ButtonId::LoadFile => self.load_file(),
            ButtonId::BackToInput => self.back_to_input(),
            ButtonId::ExpandAll => self.expand_all(),
            ButtonId::CollapseAll => self.collapse_all(),
            ButtonId::SelectAll => self.select_all(),
            ButtonId::SelectNone => self.select_none(),
            ButtonId::DeleteSelected => self.delete_selected(),
            ButtonId::AddWindow => self.add_window(),
            ButtonId::AddTab => self.open_add_tab_modal(),
            ButtonId::ShowJson => self.open_json_modal(),
            ButtonId::ModalAdd => self.submit_add_tab(),
            ButtonId::ModalCancel | ButtonId::JsonClose => self.close_modal(),
            ButtonId::JsonCopy => self.copy_json(),
            ButtonId::JsonDownload => self.download_json(),
        }
    }

    // =========================================================================
    // Scrollbars
    // =========================================================================

    /// The scrollbar for whatever surface currently scrolls.
    fn active_scrollbar(&self) -> ScrollbarWidget {
        let area = match self.screen {
            Screen::Input => self.editor_area(),
            Screen::Visualization => self.tree_view().area,
        };
        ScrollbarWidget::for_area(area, self.scale)
    }

    fn scroll_totals(&self) -> (usize, usize, usize) {
        match self.screen {
            Screen::Input => (
                self.input_screen.editor.len_lines(),
                self.editor_visible_lines(),
                self.input_screen.scroll_offset,
            ),
            Screen::Visualization => (
                self.tree_row_count(),
                self.tree_view().visible_rows(),
                self.view.scroll_offset,
            ),
        }
    }

    fn set_scroll_offset(&mut self, offset: usize) {
        match self.screen {
            Screen::Input => self.input_screen.scroll_offset = offset,
            Screen::Visualization => self.view.scroll_offset = offset,
        }
    }

    fn scrollbar_click(&mut self, x: f32, y: f32) -> Option<AppResult> {
        let bar = self.active_scrollbar();
        if !bar.hit_test(x, y) {
            return None;
        }
        let (total, visible, offset) = self.scroll_totals();
        match bar.on_click(x, y, total, visible, offset) {
            ScrollbarAction::StartDrag { drag_offset } => {
                self.ui.is_dragging_scrollbar = true;
                self.ui.scrollbar_drag_offset = drag_offset;
                Some(AppResult::Redraw)
            }
            ScrollbarAction::JumpTo { ratio } => {
                self.set_scroll_offset(ScrollbarWidget::offset_for_ratio(ratio, total, visible));
                Some(AppResult::Redraw)
            }
            ScrollbarAction::None => Some(AppResult::Ok),
        }
    }

    fn drag_scrollbar(&mut self, y: f32) -> AppResult {
        let bar = self.active_scrollbar();
        let (total, visible, offset) = self.scroll_totals();
        if let Some(ratio) =
            bar.drag_ratio(y, total, visible, self.ui.scrollbar_drag_offset, offset)
        {
            let next = ScrollbarWidget::offset_for_ratio(ratio, total, visible);
            if next != offset {
                self.set_scroll_offset(next);
                return AppResult::Redraw;
            }
        }
        AppResult::Ok
    }
}
