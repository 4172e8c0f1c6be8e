//! Document state: cursors, selections, edit orchestration and dirty tracking.
//!
//! A `Document` pairs one `core_text::TextBuffer` with one `CursorSet`, a dirty
//! flag, a display title and an optional backing path. Documents know nothing
//! about tabs or the filesystem; `core-model` owns the collection and
//! `core-io` moves text on and off disk.
//!
//! Core invariants (must hold after every public call):
//! * every cursor position and anchor lies in `[0, content_length()]`;
//! * the cursor set is never empty and no two cursors share a position;
//! * `is_dirty()` becomes true only through an edit that changed the text and
//!   becomes false only through `mark_saved`.

use std::fmt;

pub mod cursor;
pub mod document;
pub mod line_ending;

pub use cursor::{Cursor, CursorSet};
pub use document::{DEFAULT_UNTITLED_TITLE, Document, EditSummary};
pub use line_ending::{LineEnding, NormalizedText, normalize_line_endings};

/// Stable identity of an open document. Assigned once by the registry that
/// created it and never reused while that registry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    pub const fn from_u64(val: u64) -> Self {
        Self(val)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-tab read model for a tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub id: DocumentId,
    pub title: String,
    pub dirty: bool,
    pub has_path: bool,
}
