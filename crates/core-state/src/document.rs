//! A single open document: text, cursors, dirty flag, title and backing path.
//!
//! Multi-cursor edits are applied as one combined change. Every cursor
//! contributes a span (its selection, or the character it deletes) and all
//! spans are spliced in ascending offset order against a working copy of the
//! buffer. Later spans are shifted by the net length change of everything
//! spliced before them, so each cursor lands on its own edit point. The
//! working copy replaces the live buffer only after every span applied, which
//! keeps a rejected edit from leaving half-applied text behind.

use std::ops::Range;
use std::path::{Path, PathBuf};

use core_text::{TextBuffer, TextError};
use tracing::{error, trace};

use crate::cursor::{Cursor, CursorSet};
use crate::line_ending::{LineEnding, normalize_line_endings};
use crate::{DocumentId, TabInfo};

/// Title shown for documents that have never been saved.
pub const DEFAULT_UNTITLED_TITLE: &str = "Untitled";

/// Character counts touched by one edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditSummary {
    pub removed: usize,
    pub inserted: usize,
}

impl EditSummary {
    pub fn changed(&self) -> bool {
        self.removed > 0 || self.inserted > 0
    }
}

pub struct Document {
    id: DocumentId,
    buffer: TextBuffer,
    cursors: CursorSet,
    dirty: bool,
    path: Option<PathBuf>,
    untitled_title: String,
    line_ending: LineEnding,
    mixed_line_endings: bool,
    /// Bumped on every content change; lets hosts skip re-reading unchanged text.
    revision: u64,
}

impl Document {
    /// Empty, clean, untitled document.
    pub fn new(id: DocumentId) -> Self {
        Self::from_text(id, "")
    }

    /// Clean document holding `text` with a single caret at offset 0.
    pub fn from_text(id: DocumentId, text: &str) -> Self {
        Self {
            id,
            buffer: TextBuffer::from_str(text),
            cursors: CursorSet::new(),
            dirty: false,
            path: None,
            untitled_title: DEFAULT_UNTITLED_TITLE.to_string(),
            line_ending: LineEnding::Lf,
            mixed_line_endings: false,
            revision: 0,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding, mixed: bool) -> Self {
        self.line_ending = line_ending;
        self.mixed_line_endings = mixed;
        self
    }

    pub fn with_untitled_title(mut self, title: impl Into<String>) -> Self {
        self.untitled_title = title.into();
        self
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn content(&self) -> String {
        self.buffer.content()
    }

    /// Length in characters.
    pub fn content_length(&self) -> usize {
        self.buffer.length()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line(&self, idx: usize) -> Option<String> {
        self.buffer.line(idx)
    }

    pub fn cursors(&self) -> &CursorSet {
        &self.cursors
    }

    /// Position of the primary cursor (first in insertion order).
    pub fn cursor_position(&self) -> usize {
        self.cursors.primary().position
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn has_mixed_line_endings(&self) -> bool {
        self.mixed_line_endings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// File name of the backing path, or the untitled placeholder.
    pub fn title(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.untitled_title.clone())
    }

    pub fn tab_info(&self) -> TabInfo {
        TabInfo {
            id: self.id,
            title: self.title(),
            dirty: self.dirty,
            has_path: self.path.is_some(),
        }
    }

    /// Text selected by the first cursor, if it has a selection.
    pub fn selected_text(&self) -> Option<String> {
        let primary = self.cursors.primary();
        if !primary.has_selection() {
            return None;
        }
        self.buffer.slice(primary.start(), primary.end()).ok()
    }

    /// Record a successful load/save: optionally rebind the path, clear dirty.
    pub fn mark_saved(&mut self, path: Option<PathBuf>) {
        if let Some(path) = path {
            self.path = Some(path);
        }
        self.dirty = false;
    }

    // --- cursor pass-throughs (never dirty) ---

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursors.set_single(pos, self.buffer.length());
    }

    /// Returns false if a cursor already occupied `pos` (after clamping).
    pub fn add_cursor(&mut self, pos: usize) -> bool {
        self.cursors.add(pos, self.buffer.length())
    }

    pub fn move_cursors(&mut self, delta: isize, extend: bool) {
        self.cursors.move_all(delta, extend, self.buffer.length());
    }

    pub fn select_all(&mut self) {
        self.cursors.select_all(self.buffer.length());
    }

    // --- edits ---

    /// Replace every selection with `text` (or insert at every caret).
    ///
    /// A document whose line endings were normalized on load holds LF-only
    /// text, so CR and CRLF breaks in `text` are converted to LF before
    /// insertion; saving expands them back to the document's style.
    pub fn insert_text(&mut self, text: &str) -> EditSummary {
        if text.is_empty() && !self.cursors.iter().any(Cursor::has_selection) {
            return EditSummary::default();
        }
        let normalized;
        let text = if self.line_ending != LineEnding::Lf && text.contains('\r') {
            normalized = normalize_line_endings(text).text;
            normalized.as_str()
        } else {
            text
        };
        let spans = self
            .cursors
            .iter()
            .map(|c| c.start()..c.end())
            .collect::<Vec<_>>();
        self.apply_edit("insert", spans, text)
    }

    /// Backspace: delete each selection, or the character before each caret.
    pub fn delete_backward(&mut self) -> EditSummary {
        let spans = self
            .cursors
            .iter()
            .map(|c| {
                if c.has_selection() {
                    c.start()..c.end()
                } else {
                    c.position.saturating_sub(1)..c.position
                }
            })
            .collect::<Vec<_>>();
        self.apply_edit("delete_backward", spans, "")
    }

    /// Delete key: delete each selection, or the character after each caret.
    pub fn delete_forward(&mut self) -> EditSummary {
        let len = self.buffer.length();
        let spans = self
            .cursors
            .iter()
            .map(|c| {
                if c.has_selection() {
                    c.start()..c.end()
                } else {
                    c.position..(c.position + 1).min(len)
                }
            })
            .collect::<Vec<_>>();
        self.apply_edit("delete_forward", spans, "")
    }

    fn apply_edit(&mut self, op: &'static str, spans: Vec<Range<usize>>, text: &str) -> EditSummary {
        if text.is_empty() && spans.iter().all(Range::is_empty) {
            return EditSummary::default();
        }
        let mut working = self.buffer.clone();
        match splice_all(&mut working, &spans, text) {
            Ok((cursors, summary)) => {
                self.buffer = working;
                self.cursors.replace(cursors);
                if summary.changed() {
                    self.dirty = true;
                    self.revision += 1;
                }
                trace!(
                    target: "state.edit",
                    doc = %self.id,
                    op,
                    cursors = spans.len(),
                    removed = summary.removed,
                    inserted = summary.inserted,
                    len = self.buffer.length(),
                    "edit"
                );
                summary
            }
            Err(e) => {
                error!(target: "state.edit", doc = %self.id, op, ?e, "edit_rejected");
                EditSummary::default()
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentId::from_u64(0))
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("title", &self.title())
            .field("len", &self.buffer.length())
            .field("cursors", &self.cursors.count())
            .field("dirty", &self.dirty)
            .finish()
    }
}

/// Splice `text` over every span of `buffer`. Spans are visited in ascending
/// order; a span overlapping an earlier one is clipped to start where the
/// earlier one ended so no character is removed twice. Returns the resulting
/// caret for each span, in the order the spans were given.
fn splice_all(
    buffer: &mut TextBuffer,
    spans: &[Range<usize>],
    text: &str,
) -> Result<(Vec<Cursor>, EditSummary), TextError> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by_key(|&i| (spans[i].start, spans[i].end));

    let mut carets = vec![Cursor::default(); spans.len()];
    let mut summary = EditSummary::default();
    let mut floor = 0usize;
    let mut shift = 0isize;

    for idx in order {
        let start = spans[idx].start.max(floor);
        let end = spans[idx].end.max(start);
        floor = end;

        let len = buffer.length();
        let shifted = |pos: usize| {
            pos.checked_add_signed(shift)
                .ok_or(TextError::OutOfBounds { start, end, len })
        };
        let at = shifted(start)?;
        buffer.delete_range(at, shifted(end)?)?;
        let inserted = buffer.insert(at, text)?;

        carets[idx] = Cursor::new(at + inserted);
        summary.removed += end - start;
        summary.inserted += inserted;
        shift += inserted as isize - (end - start) as isize;
    }
    Ok((carets, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> Document {
        Document::from_text(DocumentId::from_u64(1), text)
    }

    #[test]
    fn pasted_crlf_is_folded_into_crlf_document() {
        let mut d = doc("x\n").with_line_ending(LineEnding::Crlf, false);
        d.set_cursor(1);
        d.insert_text("\r\ny");
        assert_eq!(d.content(), "x\ny\n");
        assert_eq!(d.line_ending().apply(&d.content()), "x\r\ny\r\n");
    }

    #[test]
    fn pasted_breaks_are_folded_into_cr_document() {
        let mut d = doc("a\nb").with_line_ending(LineEnding::Cr, false);
        d.set_cursor(1);
        d.insert_text("1\r\n2\r3");
        assert_eq!(d.content(), "a1\n2\n3\nb");
        assert_eq!(d.line_ending().apply(&d.content()), "a1\r2\r3\rb");
    }

    #[test]
    fn raw_document_keeps_inserted_carriage_returns() {
        let mut d = doc("a\r\nb\n");
        d.set_cursor(3);
        d.insert_text("\r\n");
        assert_eq!(d.content(), "a\r\n\r\nb\n");
    }

    #[test]
    fn caret_added_inside_selection_edits_once() {
        let mut d = doc("abcdefgh");
        d.set_cursor(2);
        d.move_cursors(4, true);
        assert!(!d.add_cursor(4));
        d.insert_text("X");
        assert_eq!(d.content(), "abXgh");
        assert_eq!(d.cursors().positions(), vec![3]);
    }

    #[test]
    fn new_document_is_clean_and_untitled() {
        let d = Document::new(DocumentId::from_u64(7));
        assert!(d.is_empty());
        assert!(!d.is_dirty());
        assert_eq!(d.title(), "Untitled");
        assert_eq!(d.cursor_position(), 0);
    }

    #[test]
    fn insert_advances_caret_and_dirties() {
        let mut d = doc("");
        d.insert_text("Hello");
        assert_eq!(d.content(), "Hello");
        assert_eq!(d.cursor_position(), 5);
        assert!(d.is_dirty());
        d.insert_text(" World");
        assert_eq!(d.content(), "Hello World");
        assert_eq!(d.revision(), 2);
    }

    #[test]
    fn multi_cursor_insert_shifts_later_cursors() {
        let mut d = doc("abcdef");
        d.set_cursor(2);
        d.add_cursor(4);
        d.insert_text("X");
        assert_eq!(d.content(), "abXcdXef");
        assert_eq!(d.cursors().positions(), vec![3, 6]);
    }

    #[test]
    fn multi_cursor_insert_respects_insertion_order() {
        let mut d = doc("abcdef");
        d.set_cursor(4);
        d.add_cursor(2);
        d.insert_text("XY");
        assert_eq!(d.content(), "abXYcdXYef");
        assert_eq!(d.cursors().positions(), vec![8, 4]);
    }

    #[test]
    fn insert_replaces_selections() {
        let mut d = doc("one two three");
        d.set_cursor(0);
        d.move_cursors(3, true);
        d.insert_text("1");
        assert_eq!(d.content(), "1 two three");
        let c = d.cursors().primary();
        assert_eq!(c, Cursor::new(1));
    }

    #[test]
    fn empty_insert_without_selection_is_noop() {
        let mut d = doc("abc");
        let summary = d.insert_text("");
        assert!(!summary.changed());
        assert!(!d.is_dirty());
    }

    #[test]
    fn empty_insert_over_selection_deletes_it() {
        let mut d = doc("abc");
        d.select_all();
        d.insert_text("");
        assert_eq!(d.content(), "");
        assert!(d.is_dirty());
    }

    #[test]
    fn delete_backward_single() {
        let mut d = doc("Hello");
        d.set_cursor(5);
        d.delete_backward();
        assert_eq!(d.content(), "Hell");
        assert_eq!(d.cursor_position(), 4);
    }

    #[test]
    fn delete_backward_at_start_is_clean_noop() {
        let mut d = doc("abc");
        let summary = d.delete_backward();
        assert_eq!(summary, EditSummary::default());
        assert_eq!(d.content(), "abc");
        assert!(!d.is_dirty());
    }

    #[test]
    fn delete_forward_at_end_is_clean_noop() {
        let mut d = doc("abc");
        d.set_cursor(3);
        d.delete_forward();
        assert_eq!(d.content(), "abc");
        assert!(!d.is_dirty());
    }

    #[test]
    fn delete_forward_keeps_caret() {
        let mut d = doc("abc");
        d.set_cursor(1);
        d.delete_forward();
        assert_eq!(d.content(), "ac");
        assert_eq!(d.cursor_position(), 1);
    }

    #[test]
    fn multi_cursor_backspace_merges_adjacent_carets() {
        let mut d = doc("abc");
        d.set_cursor(1);
        d.add_cursor(2);
        d.delete_backward();
        assert_eq!(d.content(), "c");
        assert_eq!(d.cursors().positions(), vec![0]);
    }

    #[test]
    fn multi_cursor_backspace_mixed_edges() {
        let mut d = doc("ab|cd");
        d.set_cursor(0);
        d.add_cursor(3);
        d.add_cursor(5);
        d.delete_backward();
        assert_eq!(d.content(), "abc");
        assert_eq!(d.cursors().positions(), vec![0, 2, 3]);
    }

    #[test]
    fn overlapping_delete_spans_are_clipped() {
        // Backward selection [1,4) plus a caret at 4 whose backspace targets index 3 again.
        let mut d = doc("abcdef");
        d.set_cursor(4);
        d.move_cursors(-3, true);
        assert!(d.add_cursor(4));
        d.delete_backward();
        assert_eq!(d.content(), "aef");
        assert_eq!(d.cursors().positions(), vec![1]);
    }

    #[test]
    fn select_all_then_insert_replaces_everything() {
        let mut d = doc("old text");
        d.select_all();
        assert_eq!(d.selected_text().as_deref(), Some("old text"));
        d.insert_text("new");
        assert_eq!(d.content(), "new");
        assert_eq!(d.selected_text(), None);
    }

    #[test]
    fn cursor_operations_never_dirty() {
        let mut d = doc("abc");
        d.set_cursor(2);
        d.add_cursor(1);
        d.move_cursors(-1, true);
        d.select_all();
        assert!(!d.is_dirty());
        assert_eq!(d.revision(), 0);
    }

    #[test]
    fn mark_saved_clears_dirty_and_sets_title() {
        let mut d = doc("");
        d.insert_text("x");
        d.mark_saved(Some(PathBuf::from("/tmp/notes.md")));
        assert!(!d.is_dirty());
        assert_eq!(d.title(), "notes.md");
        assert!(d.tab_info().has_path);
    }

    #[test]
    fn custom_untitled_title() {
        let d = doc("").with_untitled_title("New File");
        assert_eq!(d.title(), "New File");
    }

    #[test]
    fn multibyte_offsets_are_characters() {
        let mut d = doc("é漢");
        d.set_cursor(1);
        d.insert_text("😀");
        assert_eq!(d.content(), "é😀漢");
        assert_eq!(d.cursor_position(), 2);
        assert_eq!(d.content_length(), 3);
    }
}
