//! Lightweight single-line input with cursor.
//!
//! Stores a `String` and a character-offset cursor. Handles insert,
//! delete, move, and clipboard paste (via `arboard`). Used for both the
//! API key field (rendered masked) and the topic field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single-line text buffer with cursor position (character offset).
#[derive(Debug)]
pub struct InputLine {
    content: String,
    /// Cursor position as a character offset (0 = before first char).
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
        }
    }

    /// Current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position (character offset).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Set content and move cursor to end.
    pub fn set_content(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.content.chars().count();
    }

    /// Trimmed content. Leaves the buffer as is.
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    /// Insert a character at the cursor position. Control line breaks are
    /// dropped; the field stays on one line.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\r' || ch == '\n' {
            return;
        }
        let byte_offset = self.byte_offset();
        self.content.insert(byte_offset, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position. Line breaks become spaces.
    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace("\r\n", " ").replace(['\r', '\n'], " ");
        let byte_offset = self.byte_offset();
        self.content.insert_str(byte_offset, &clean);
        self.cursor += clean.chars().count();
    }

    /// Delete the character before the cursor (Backspace).
    pub fn delete_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_offset = self.byte_offset();
        if let Some(ch) = self.content[byte_offset..].chars().next() {
            self.content.replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Delete the character at the cursor (Delete key).
    pub fn delete_forward(&mut self) {
        let byte_offset = self.byte_offset();
        if let Some(ch) = self.content[byte_offset..].chars().next() {
            self.content.replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Move cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor one character right.
    pub fn move_right(&mut self) {
        let max = self.content.chars().count();
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    /// Delete the word before the cursor (Ctrl+Backspace / Ctrl+W).
    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let chars: Vec<char> = self.content.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        let start_byte = self.char_to_byte(pos);
        let end_byte = self.byte_offset();
        self.content.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }

    /// Paste from system clipboard (Ctrl+V).
    pub fn paste_clipboard(&mut self) {
        if let Ok(mut clip) = arboard::Clipboard::new() {
            if let Ok(text) = clip.get_text() {
                self.insert_str(&text);
            }
        }
    }

    /// Handle an editing key. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('v') if ctrl => {
                self.paste_clipboard();
                true
            }
            KeyCode::Char('w') if ctrl => {
                self.delete_word_back();
                true
            }
            KeyCode::Backspace if ctrl => {
                self.delete_word_back();
                true
            }
            // Other Ctrl chords belong to the app, not the field.
            KeyCode::Char(_) if ctrl => false,
            KeyCode::Char(ch) => {
                self.insert_char(ch);
                true
            }
            KeyCode::Backspace => {
                self.delete_back();
                true
            }
            KeyCode::Delete => {
                self.delete_forward();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Home => {
                self.move_home();
                true
            }
            KeyCode::End => {
                self.move_end();
                true
            }
            _ => false,
        }
    }

    /// Convert cursor (char offset) to byte offset.
    fn byte_offset(&self) -> usize {
        self.char_to_byte(self.cursor)
    }

    /// Convert a character offset to a byte offset.
    fn char_to_byte(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new()
    }
}
