//! Single-line text input used by the instance filter.

use crate::message::InputKey;

/// Maximum number of characters accepted by the filter input.
pub const FILTER_CHAR_LIMIT: usize = 20;

pub const FILTER_PLACEHOLDER: &str = "key=value or state";

#[derive(Clone, Debug, PartialEq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters, `0..=len`.
    cursor: usize,
    limit: usize,
}

impl TextInput {
    pub fn new(limit: usize) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            limit,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the content and puts the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(self.limit).collect();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        if self.len() >= self.limit {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    /// Applies a line-edit key. Keys without an editing meaning are ignored.
    pub fn handle_key(&mut self, key: InputKey) {
        match key {
            InputKey::Char(c) => self.insert(c),
            InputKey::Backspace => self.backspace(),
            InputKey::Delete => self.delete(),
            InputKey::Left => self.cursor = self.cursor.saturating_sub(1),
            InputKey::Right => self.cursor = (self.cursor + 1).min(self.len()),
            InputKey::Home | InputKey::CharCtrl('a') => self.cursor = 0,
            InputKey::End | InputKey::CharCtrl('e') => self.cursor = self.len(),
            InputKey::CharCtrl('u') => self.clear(),
            _ => {}
        }
    }
}
