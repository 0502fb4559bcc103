//! Single-line text input widget (search bar, modal form fields)

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor: usize, // byte index
    selection_anchor: Option<usize>,
    pub scroll_offset: f32,
}

impl TextInput {
    pub fn new(text: String) -> Self {
        let cursor = text.len();
        Self {
            text,
            cursor,
            selection_anchor: None,
            scroll_offset: 0.0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
        self.selection_anchor = None;
        self.scroll_offset = 0.0;
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.delete_selection();
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if let Some(prev) = self.text[..self.cursor].chars().last() {
            self.cursor -= prev.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self, selecting: bool) {
        if !selecting {
            if let Some((start, _)) = self.selection_range() {
                self.cursor = start;
                self.selection_anchor = None;
                return;
            }
        }
        self.update_anchor(selecting);
        if let Some(prev) = self.text[..self.cursor].chars().last() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self, selecting: bool) {
        if !selecting {
            if let Some((_, end)) = self.selection_range() {
                self.cursor = end;
                self.selection_anchor = None;
                return;
            }
        }
        self.update_anchor(selecting);
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_to_start(&mut self, selecting: bool) {
        self.update_anchor(selecting);
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self, selecting: bool) {
        self.update_anchor(selecting);
        self.cursor = self.text.len();
    }

    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.text.len();
    }

    pub fn selected_text(&self) -> &str {
        match self.selection_range() {
            Some((start, end)) => &self.text[start..end],
            None => "",
        }
    }

    pub fn delete_selection(&mut self) -> bool {
        if let Some((start, end)) = self.selection_range() {
            self.text.drain(start..end);
            self.cursor = start;
            self.selection_anchor = None;
            true
        } else {
            false
        }
    }

    /// Paste, with newlines stripped for the single-line field.
    pub fn paste(&mut self, text: &str) {
        self.delete_selection();
        let filtered: String = text.chars().filter(|&c| c != '\n' && c != '\r').collect();
        self.text.insert_str(self.cursor, &filtered);
        self.cursor += filtered.len();
    }

    pub fn copy(&self) -> Option<String> {
        let text = self.selected_text();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    pub fn cut(&mut self) -> Option<String> {
        let copied = self.copy();
        if copied.is_some() {
            self.delete_selection();
        }
        copied
    }

    /// Place the cursor from a click x position inside the field.
    pub fn set_cursor_from_x(&mut self, x: f32, char_width: f32, selecting: bool) {
        self.update_anchor(selecting);
        let char_index = ((x + self.scroll_offset) / char_width).round().max(0.0) as usize;
        let mut byte_idx = 0;
        for (seen, ch) in self.text.chars().enumerate() {
            if seen >= char_index {
                break;
            }
            byte_idx += ch.len_utf8();
        }
        self.cursor = byte_idx.min(self.text.len());
    }

    pub fn ensure_cursor_visible(&mut self, visible_width: f32, char_width: f32) {
        let cursor_x = self.text[..self.cursor].chars().count() as f32 * char_width;
        if cursor_x < self.scroll_offset {
            self.scroll_offset = cursor_x;
        }
        if cursor_x + char_width > self.scroll_offset + visible_width {
            self.scroll_offset = cursor_x - visible_width + char_width * 2.0;
        }
        self.scroll_offset = self.scroll_offset.max(0.0);
    }

    fn update_anchor(&mut self, selecting: bool) {
        if selecting {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.cursor);
            }
        } else {
            self.selection_anchor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInput::default();
        for ch in "beta".chars() {
            input.insert_char(ch);
        }
        assert_eq!(input.text(), "beta");
        input.backspace();
        assert_eq!(input.text(), "bet");
    }

    #[test]
    fn paste_strips_newlines() {
        let mut input = TextInput::default();
        input.paste("multi\nline\r\ntext");
        assert_eq!(input.text(), "multilinetext");
    }

    #[test]
    fn select_all_then_type_replaces() {
        let mut input = TextInput::new("old term".to_string());
        input.select_all();
        input.insert_char('x');
        assert_eq!(input.text(), "x");
    }
}
