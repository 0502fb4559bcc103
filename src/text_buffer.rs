//! Text buffer for the JSON input editor, backed by ropey
//! O(log n) insertions and deletions; positions are char indices.

use ropey::Rope;

pub struct TextBuffer {
    rope: Rope,
    cursor: usize,                   // Character position (also end of selection)
    selection_anchor: Option<usize>, // Start of selection (None = no selection)
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: 0,
            selection_anchor: None,
        }
    }

    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            selection_anchor: None,
        }
    }

    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// One line's text without its trailing newline.
    pub fn line(&self, line_idx: usize) -> String {
        if line_idx >= self.rope.len_lines() {
            return String::new();
        }
        let line = self.rope.line(line_idx);
        let mut text = line.to_string();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.rope.len_chars().min(self.cursor);
        self.selection_anchor = None;
    }

    pub fn clear(&mut self) {
        self.rope = Rope::new();
        self.cursor = 0;
        self.selection_anchor = None;
    }

    // =========================================================================
    // Editing
    // =========================================================================

    pub fn insert(&mut self, ch: char) {
        self.delete_selection();
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        self.delete_selection();
        self.rope.insert(self.cursor, text);
        self.cursor += text.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
            self.rope.remove(self.cursor..self.cursor + 1);
        }
    }

    pub fn delete(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor < self.rope.len_chars() {
            self.rope.remove(self.cursor..self.cursor + 1);
        }
    }

    pub fn delete_selection(&mut self) -> bool {
        if let Some((start, end)) = self.selection_range() {
            self.rope.remove(start..end);
            self.cursor = start;
            self.selection_anchor = None;
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn selection_range_line_col(&self) -> Option<((usize, usize), (usize, usize))> {
        let (start, end) = self.selection_range()?;
        Some((self.char_to_line_col(start), self.char_to_line_col(end)))
    }

    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.rope.len_chars();
    }

    pub fn selected_text(&self) -> String {
        match self.selection_range() {
            Some((start, end)) => self.rope.slice(start..end).to_string(),
            None => String::new(),
        }
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

    // =========================================================================
    // Cursor movement
    // =========================================================================

    pub fn move_left(&mut self, selecting: bool) {
        if !selecting {
            if let Some((start, _)) = self.selection_range() {
                self.cursor = start;
                self.selection_anchor = None;
                return;
            }
        }
        self.update_anchor(selecting);
        self.cursor = self.cursor.saturating_sub(1);
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
        self.cursor = (self.cursor + 1).min(self.rope.len_chars());
    }

    pub fn move_up(&mut self, selecting: bool) {
        self.update_anchor(selecting);
        let (line, col) = self.char_to_line_col(self.cursor);
        if line > 0 {
            self.set_cursor_line_col_internal(line - 1, col);
        } else {
            self.cursor = 0;
        }
    }

    pub fn move_down(&mut self, selecting: bool) {
        self.update_anchor(selecting);
        let (line, col) = self.char_to_line_col(self.cursor);
        if line + 1 < self.rope.len_lines() {
            self.set_cursor_line_col_internal(line + 1, col);
        } else {
            self.cursor = self.rope.len_chars();
        }
    }

    pub fn move_to_line_start(&mut self, selecting: bool) {
        self.update_anchor(selecting);
        let (line, _) = self.char_to_line_col(self.cursor);
        self.cursor = self.rope.line_to_char(line);
    }

    pub fn move_to_line_end(&mut self, selecting: bool) {
        self.update_anchor(selecting);
        let (line, _) = self.char_to_line_col(self.cursor);
        self.set_cursor_line_col_internal(line, usize::MAX);
    }

    pub fn move_to_start(&mut self, selecting: bool) {
        self.update_anchor(selecting);
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self, selecting: bool) {
        self.update_anchor(selecting);
        self.cursor = self.rope.len_chars();
    }

    /// Place the cursor by (line, col), clamping both.
    pub fn set_cursor_position(&mut self, line: usize, col: usize, selecting: bool) {
        self.update_anchor(selecting);
        self.set_cursor_line_col_internal(line, col);
    }

    fn set_cursor_line_col_internal(&mut self, line: usize, col: usize) {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line);
        let line_len = self.line_len_chars(line);
        self.cursor = line_start + col.min(line_len);
    }

    fn line_len_chars(&self, line_idx: usize) -> usize {
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        // Exclude the trailing line break from the addressable columns.
        let text = line.to_string();
        if text.ends_with('\n') {
            len -= 1;
            if text.ends_with("\r\n") {
                len -= 1;
            }
        }
        len
    }

    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let col = char_idx - self.rope.line_to_char(line);
        (line, col)
    }

    pub fn cursor_line(&self) -> usize {
        self.char_to_line_col(self.cursor).0
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_content() {
        let mut buf = TextBuffer::new();
        buf.insert('{');
        buf.insert_str("\"a\": 1");
        buf.insert('}');
        assert_eq!(buf.content(), "{\"a\": 1}");
    }

    #[test]
    fn backspace_and_delete() {
        let mut buf = TextBuffer::from_str("ab");
        buf.move_to_end(false);
        buf.backspace();
        assert_eq!(buf.content(), "a");
        buf.move_to_start(false);
        buf.delete();
        assert_eq!(buf.content(), "");
    }

    #[test]
    fn selection_replaces_on_insert() {
        let mut buf = TextBuffer::from_str("hello world");
        buf.select_all();
        buf.insert('x');
        assert_eq!(buf.content(), "x");
    }

    #[test]
    fn line_accessor_strips_newline() {
        let buf = TextBuffer::from_str("one\ntwo\n");
        assert_eq!(buf.line(0), "one");
        assert_eq!(buf.line(1), "two");
        assert_eq!(buf.line(5), "");
    }

    #[test]
    fn vertical_movement_clamps_column() {
        let mut buf = TextBuffer::from_str("long line here\nab\nlonger again");
        buf.set_cursor_position(0, 10, false);
        buf.move_down(false);
        assert_eq!(buf.char_to_line_col(buf.cursor()), (1, 2));
        buf.move_down(false);
        assert_eq!(buf.char_to_line_col(buf.cursor()), (2, 2));
    }

    #[test]
    fn shift_movement_extends_selection() {
        let mut buf = TextBuffer::from_str("abcd");
        buf.move_right(false);
        buf.move_right(true);
        buf.move_right(true);
        assert_eq!(buf.selection_range(), Some((1, 3)));
        assert_eq!(buf.selected_text(), "bc");
    }
}
