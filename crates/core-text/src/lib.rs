//! Rope-based text buffer abstraction.
//!
//! Every offset accepted or returned here is a *character* index (Unicode
//! scalar values), never a byte index. Cursor positions elsewhere in the
//! workspace are compared and reported in the same unit, so the buffer is the
//! single place that translates between characters and the rope's storage.

use ropey::Rope;
use thiserror::Error;

/// Addressing error raised when an offset or range falls outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("range {start}..{end} out of bounds for buffer of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, TextError>;

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Character count. O(1) on the rope's cached metadata.
    pub fn length(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Full current text.
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Insert `text` at character `offset`. Returns the number of characters inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<usize> {
        let len = self.length();
        if offset > len {
            return Err(TextError::OutOfBounds {
                start: offset,
                end: offset,
                len,
            });
        }
        self.rope.insert(offset, text);
        Ok(self.length() - len)
    }

    /// Remove the characters in `[start, end)` and return them.
    /// `start == end` is a no-op returning an empty string.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(String::new());
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        Ok(removed)
    }

    /// Copy of the characters in `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// Total number of lines. An empty buffer and a buffer ending in a newline
    /// both count the (empty) trailing line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Return the requested line as an owned `String` (including trailing newline if present).
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx < self.rope.len_lines() {
            Some(self.rope.line(idx).to_string())
        } else {
            None
        }
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        let len = self.length();
        if start > end || end > len {
            return Err(TextError::OutOfBounds { start, end, len });
        }
        Ok(())
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("chars", &self.rope.len_chars())
            .field("lines", &self.rope.len_lines())
            .finish()
    }
}

impl From<&str> for TextBuffer {
    fn from(content: &str) -> Self {
        Self::from_str(content)
    }
}
