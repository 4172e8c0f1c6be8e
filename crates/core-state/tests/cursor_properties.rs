//! Property-based tests for cursor clamping and multi-cursor edit invariants.

use core_state::{Cursor, Document, DocumentId};
use proptest::prelude::*;

fn doc(text: &str) -> Document {
    Document::from_text(DocumentId::from_u64(1), text)
}

fn assert_cursors_valid(d: &Document) -> Result<(), TestCaseError> {
    let len = d.content_length();
    let positions = d.cursors().positions();
    prop_assert!(!positions.is_empty());
    for c in d.cursors().iter() {
        prop_assert!(c.position <= len && c.anchor <= len, "cursor {:?} outside 0..={}", c, len);
    }
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    sorted.dedup();
    prop_assert_eq!(sorted.len(), positions.len(), "duplicate cursor positions");
    Ok(())
}

proptest! {
    // move_cursors never leaves [0, len], whatever the delta magnitude.
    #[test]
    fn move_never_escapes_bounds(
        text in "[a-z]{0,30}",
        start in 0usize..40,
        extra in proptest::collection::vec(0usize..40, 0..4),
        delta in any::<isize>(),
        extend in any::<bool>(),
    ) {
        let mut d = doc(&text);
        d.set_cursor(start);
        for p in extra {
            d.add_cursor(p);
        }
        d.move_cursors(delta, extend);
        assert_cursors_valid(&d)?;
    }

    // select_all yields exactly one cursor spanning [0, len].
    #[test]
    fn select_all_spans_buffer(text in "[a-z\n]{0,30}", cursors in proptest::collection::vec(0usize..40, 0..5)) {
        let mut d = doc(&text);
        for p in cursors {
            d.add_cursor(p);
        }
        d.select_all();
        let len = d.content_length();
        prop_assert_eq!(d.cursors().as_slice(), &[Cursor::with_anchor(0, len)]);
    }

    // Any sequence of edits keeps every cursor valid and unique.
    #[test]
    fn edits_preserve_cursor_invariants(
        text in "[a-z]{0,20}",
        cursors in proptest::collection::vec(0usize..25, 1..5),
        ops in proptest::collection::vec(0u8..5, 1..12),
    ) {
        let mut d = doc(&text);
        d.set_cursor(cursors[0]);
        for p in &cursors[1..] {
            d.add_cursor(*p);
        }
        for op in ops {
            match op {
                0 => { d.insert_text("xy"); }
                1 => { d.delete_backward(); }
                2 => { d.delete_forward(); }
                3 => d.move_cursors(-2, true),
                _ => d.move_cursors(1, false),
            }
            assert_cursors_valid(&d)?;
        }
    }

    // Typing at N distinct carets grows the text by N copies.
    #[test]
    fn insert_at_each_caret_grows_by_cursor_count(
        text in "[a-z]{0,20}",
        cursors in proptest::collection::vec(0usize..25, 1..6),
    ) {
        let mut d = doc(&text);
        d.set_cursor(cursors[0]);
        for p in &cursors[1..] {
            d.add_cursor(*p);
        }
        let count = d.cursors().count();
        let before = d.content_length();
        d.insert_text("#");
        prop_assert_eq!(d.content_length(), before + count);
        prop_assert_eq!(d.content().matches('#').count(), count);
        prop_assert!(d.is_dirty());
    }
}
