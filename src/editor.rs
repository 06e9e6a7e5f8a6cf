//! Text input
//!
//! A small cursor-aware editor shared by every input in the shell: the
//! chooser fields, the endpoint search, parameter values and the request
//! body. Single-line inputs simply never call `insert_newline`.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextEditor {
    content: String,

    /// Cursor position (byte offset in content)
    cursor: usize,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor with the cursor at the end of `content`
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            cursor: content.len(),
            content,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Replace all content, cursor at the end
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.len();
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    /// Insert a string, converting curly quotes to straight ones
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2018}', '\u{2019}'], "'");

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, &normalized);
        self.cursor = cursor + normalized.len();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char_before_cursor(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        let Some(prev) = self.content[..cursor].chars().next_back() else {
            return false;
        };
        let start = cursor - prev.len_utf8();
        self.content.replace_range(start..cursor, "");
        self.cursor = start;
        true
    }

    /// Delete the character after the cursor (delete key)
    pub fn delete_char_after_cursor(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        if cursor >= self.content.len() {
            return false;
        }
        self.content.remove(cursor);
        true
    }

    /// Delete back to the previous word boundary (space, slash, colon, dot)
    pub fn delete_word_before_cursor(&mut self) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        let head = self.content[..cursor].trim_end_matches([' ', '/', ':', '.']);
        let start = head
            .rfind([' ', '/', ':', '.'])
            .map(|pos| pos + 1)
            .unwrap_or(0);
        self.content.replace_range(start..cursor, "");
        self.cursor = start;
    }

    pub fn move_cursor_left(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        match self.content[..cursor].chars().next_back() {
            Some(prev) => {
                self.cursor = cursor - prev.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_right(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        match self.content[cursor..].chars().next() {
            Some(next) => {
                self.cursor = cursor + next.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Prettify the content as JSON
    pub fn format_json(&mut self) -> Result<(), String> {
        let json: Value =
            serde_json::from_str(&self.content).map_err(|e| format!("Invalid JSON: {e}"))?;
        let pretty = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
        self.set_content(pretty);
        Ok(())
    }

    /// Handle the editing keys common to every input; returns true if handled
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('a') if ctrl => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::Char('e') if ctrl => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('w') if ctrl => {
                self.delete_word_before_cursor();
                true
            }
            KeyCode::Char('l') if ctrl => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.handle_paste_batch(c);
                true
            }
            _ => false,
        }
    }

    /// Insert `initial_char` plus any character events already queued
    ///
    /// Terminal pastes arrive as a burst of key events; draining them in one
    /// go keeps the UI from redrawing once per character.
    /// Returns the number of characters inserted.
    pub fn handle_paste_batch(&mut self, initial_char: char) -> usize {
        let mut chars = vec![initial_char];

        while let Ok(true) = crossterm::event::poll(std::time::Duration::from_millis(0)) {
            match crossterm::event::read() {
                Ok(Event::Key(next_key)) => match next_key.code {
                    KeyCode::Char(next_c)
                        if !next_key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        chars.push(next_c);
                    }
                    _ => break,
                },
                _ => break,
            }
        }

        let count = chars.len();
        let batch: String = chars.into_iter().collect();
        self.insert_str(&batch);
        count
    }

    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
