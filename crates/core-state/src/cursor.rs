//! Cursor / selection model.
//!
//! A `Cursor` is a `(position, anchor)` pair of character offsets. When the two
//! are equal the cursor is a plain caret; otherwise it selects the half-open
//! range `[min, max)`. A `CursorSet` owns every cursor of one document.
//!
//! Invariants (hold after every public call):
//! * the set is never empty;
//! * no two cursors share a `position`;
//! * cursors are kept in insertion order. The first cursor is the one
//!   established by `set_single` / `select_all` and is what single-cursor
//!   queries report.
//!
//! Clamping is the caller-facing defense against out-of-range offsets: every
//! entry point takes the current buffer length and pins positions into
//! `[0, len]` instead of reporting an error.

/// Caret with an optional selection anchor, both measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub position: usize,
    pub anchor: usize,
}

impl Cursor {
    /// Caret at `pos` with no selection.
    pub fn new(pos: usize) -> Self {
        Self {
            position: pos,
            anchor: pos,
        }
    }

    /// Selection from `anchor` to `position` (either order).
    pub fn with_anchor(anchor: usize, position: usize) -> Self {
        Self { position, anchor }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.position)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.position)
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.position
    }

    /// Number of selected characters (0 for a caret).
    pub fn selection_len(&self) -> usize {
        self.end() - self.start()
    }

    /// True if the selection extends leftwards from its anchor.
    pub fn is_backward(&self) -> bool {
        self.position < self.anchor
    }

    /// Whether `pos` lies inside the selected range `[start, end)`.
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start() && pos < self.end()
    }

    /// Drop the selection, keeping the caret where it is.
    pub fn collapse(&mut self) {
        self.anchor = self.position;
    }

    pub fn collapse_to_start(&mut self) {
        let start = self.start();
        self.position = start;
        self.anchor = start;
    }

    pub fn collapse_to_end(&mut self) {
        let end = self.end();
        self.position = end;
        self.anchor = end;
    }

    /// Move the caret by `delta` characters, clamped to `[0, max]`. With
    /// `extend` the anchor stays put (growing or shrinking a selection);
    /// otherwise the selection collapses onto the new position.
    pub fn move_by(&mut self, delta: isize, max: usize, extend: bool) {
        let from = self.position.min(max);
        let to = if delta < 0 {
            from.saturating_sub(delta.unsigned_abs())
        } else {
            from.saturating_add(delta.unsigned_abs()).min(max)
        };
        self.position = to;
        if extend {
            self.anchor = self.anchor.min(max);
        } else {
            self.anchor = to;
        }
    }

    /// Two cursors must be merged when their carets coincide or their ranges
    /// share at least one character.
    fn collides(&self, other: &Cursor) -> bool {
        self.position == other.position
            || (self.start() < other.end() && other.start() < self.end())
    }

    fn union(&self, other: &Cursor) -> Cursor {
        let start = self.start().min(other.start());
        let end = self.end().max(other.end());
        if self.is_backward() || other.is_backward() {
            Cursor::with_anchor(end, start)
        } else {
            Cursor::with_anchor(start, end)
        }
    }
}

/// Ordered, never-empty collection of cursors for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSet {
    cursors: Vec<Cursor>,
}

impl Default for CursorSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorSet {
    /// Single caret at offset 0.
    pub fn new() -> Self {
        Self {
            cursors: vec![Cursor::default()],
        }
    }

    /// Replace every cursor with one caret at `pos` (clamped to `len`).
    pub fn set_single(&mut self, pos: usize, len: usize) {
        self.cursors = vec![Cursor::new(pos.min(len))];
    }

    /// Append a caret at `pos` (clamped). Returns false when nothing was
    /// added: a cursor already sits at that position, or the caret falls
    /// strictly inside an existing selection and is absorbed by it.
    pub fn add(&mut self, pos: usize, len: usize) -> bool {
        let pos = pos.min(len);
        if self.cursors.iter().any(|c| c.position == pos) {
            return false;
        }
        let before = self.cursors.len();
        self.cursors.push(Cursor::new(pos));
        self.normalize();
        self.cursors.len() > before
    }

    /// Move every cursor by `delta`, then merge cursors that now collide.
    pub fn move_all(&mut self, delta: isize, extend: bool, len: usize) {
        for cursor in &mut self.cursors {
            cursor.move_by(delta, len, extend);
        }
        self.normalize();
    }

    /// One cursor selecting the whole buffer.
    pub fn select_all(&mut self, len: usize) {
        self.cursors = vec![Cursor::with_anchor(0, len)];
    }

    /// The first cursor in insertion order.
    pub fn primary(&self) -> Cursor {
        self.cursors[0]
    }

    pub fn count(&self) -> usize {
        self.cursors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.iter()
    }

    pub fn as_slice(&self) -> &[Cursor] {
        &self.cursors
    }

    /// Positions of every cursor in insertion order.
    pub fn positions(&self) -> Vec<usize> {
        self.cursors.iter().map(|c| c.position).collect()
    }

    /// Install cursors computed by an edit. An empty replacement leaves the
    /// set untouched so the never-empty invariant holds.
    pub(crate) fn replace(&mut self, cursors: Vec<Cursor>) {
        if cursors.is_empty() {
            return;
        }
        self.cursors = cursors;
        self.normalize();
    }

    /// Merge colliding cursors. Each merged group keeps the slot of its
    /// earliest member so insertion order survives.
    fn normalize(&mut self) {
        if self.cursors.len() < 2 {
            return;
        }
        let mut order: Vec<usize> = (0..self.cursors.len()).collect();
        order.sort_by_key(|&i| (self.cursors[i].start(), self.cursors[i].end()));

        let mut groups: Vec<(usize, Cursor)> = Vec::with_capacity(order.len());
        for idx in order {
            let cursor = self.cursors[idx];
            if let Some((slot, merged)) = groups.last_mut()
                && merged.collides(&cursor)
            {
                *merged = merged.union(&cursor);
                *slot = (*slot).min(idx);
                continue;
            }
            groups.push((idx, cursor));
        }
        groups.sort_by_key(|(slot, _)| *slot);

        let mut merged: Vec<Cursor> = Vec::with_capacity(groups.len());
        for (_, cursor) in groups {
            if !merged.iter().any(|c| c.position == cursor.position) {
                merged.push(cursor);
            }
        }
        self.cursors = merged;
    }
}
