//! Query text editing (pure state transitions).
//!
//! Holds the text being typed and a cursor measured in characters. Every
//! method reports whether the text changed so the caller knows when to
//! notify the session.

/// Editable query line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    /// Cursor position in characters, `0..=char_count`.
    cursor: usize,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the character at `char_idx` (or the end).
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    /// Insert `ch` at the cursor and advance past it.
    pub fn insert(&mut self, ch: char) -> bool {
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, ch);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor. No-op at position 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.text.remove(offset);
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor. No-op at the end.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let offset = self.byte_offset(self.cursor);
        self.text.remove(offset);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Replace the whole text, cursor at the end.
    pub fn set(&mut self, text: &str) -> bool {
        if self.text == text {
            self.move_end();
            return false;
        }
        *self = Self::with_text(text);
        true
    }

    /// Empty the line.
    pub fn clear(&mut self) -> bool {
        self.set("")
    }

    /// Text before and after the cursor, split on a character boundary.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_offset(self.cursor))
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "query_input_tests.rs"]
mod tests;
