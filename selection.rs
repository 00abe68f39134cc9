//! Selections over a line store.
//!
//! A [`Selection`] is a pair of buffer indices: `head`, where the caret sits,
//! and `tail`, the anchor left behind when extending. A selection is
//! *oriented* when `head <= tail` and *singular* when they coincide (a bare
//! caret).
//!
//! Beyond the usual boundary queries, selections carry the re-anchoring
//! algebra used when several carets edit the same buffer: [`Selection::pull`]
//! removes a selection-shaped region from in front of an index, and
//! [`Selection::push`] inserts one. A document applies an edit by pulling the
//! edited region out of every sibling selection and pushing the inserted
//! content's shape back in.

use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  line_store::LineStore,
  position::Index,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
  pub head: Index,
  pub tail: Index,
}

impl Selection {
  pub fn new(head: impl Into<Index>, tail: impl Into<Index>) -> Self {
    Self {
      head: head.into(),
      tail: tail.into(),
    }
  }

  /// A singular selection, head and tail coinciding.
  pub fn caret(index: impl Into<Index>) -> Self {
    let index = index.into();
    Self {
      head: index,
      tail: index,
    }
  }

  #[inline]
  pub fn is_singular(&self) -> bool {
    self.head == self.tail
  }

  #[inline]
  pub fn is_oriented(&self) -> bool {
    self.head <= self.tail
  }

  #[inline]
  pub fn is_single_line(&self) -> bool {
    self.head.row == self.tail.row
  }

  #[must_use]
  pub fn swapped(self) -> Self {
    Self {
      head: self.tail,
      tail: self.head,
    }
  }

  /// Same span with `head <= tail`.
  #[must_use]
  pub fn oriented(self) -> Self {
    if self.is_oriented() { self } else { self.swapped() }
  }

  pub fn intersects_row(&self, row: usize) -> bool {
    let s = self.oriented();
    s.head.row <= row && row <= s.tail.row
  }

  /// Column span this selection covers on `row`: partial on the boundary
  /// rows, the full line on interior rows, empty elsewhere.
  pub fn column_range_on_row(&self, row: usize, num_columns: usize) -> (usize, usize) {
    let s = self.oriented();
    if row < s.head.row || row > s.tail.row {
      return (0, 0);
    }
    if s.is_single_line() {
      return (s.head.col, s.tail.col);
    }
    if row == s.head.row {
      return (s.head.col, num_columns);
    }
    if row == s.tail.row {
      return (0, s.tail.col);
    }
    (0, num_columns)
  }

  /// Columns pushed outward to the line boundaries, keeping orientation.
  #[must_use]
  pub fn horizontally_maximized(self, store: &LineStore) -> Self {
    let mut s = self;
    if self.is_oriented() {
      s.head.col = 0;
      s.tail.col = store.num_columns(s.tail.row);
    } else {
      s.head.col = store.num_columns(s.head.row);
      s.tail.col = 0;
    }
    s
  }

  /// The selection spanning `content`'s shape, anchored at zero.
  pub fn measuring(content: &str) -> Self {
    Self {
      head: Index::zero(),
      tail: Index::zero().traverse(content),
    }
  }

  /// Re-anchors a zero-based shape (as built by [`Selection::measuring`]) at
  /// `index`.
  #[must_use]
  pub fn starting_from(self, index: Index) -> Self {
    let tail = if self.is_single_line() {
      Index::new(index.row, index.col + (self.tail.col - self.head.col))
    } else {
      Index::new(index.row + (self.tail.row - self.head.row), self.tail.col)
    };
    Self { head: index, tail }
  }

  fn column_span(oriented: &Selection) -> usize {
    if oriented.is_single_line() {
      oriented.tail.col - oriented.head.col
    } else {
      oriented.tail.col
    }
  }

  /// Re-anchors `index` as if this selection's span were removed from the
  /// buffer. Arithmetic saturates at zero; callers keep sibling selections
  /// off the removed span.
  pub fn pull(&self, index: &mut Index) {
    let s = self.oriented();
    if s.tail.row == index.row && s.head.col <= index.col {
      index.col = index.col.saturating_sub(Self::column_span(&s));
    }
    if s.head.row <= index.row {
      index.row = index.row.saturating_sub(s.tail.row - s.head.row);
    }
  }

  /// Re-anchors `index` as if this selection's span were inserted into the
  /// buffer. The inverse of [`Selection::pull`] for indices outside the span.
  pub fn push(&self, index: &mut Index) {
    let s = self.oriented();
    if s.head.row == index.row && s.head.col <= index.col {
      index.col += Self::column_span(&s);
    }
    if s.head.row <= index.row {
      index.row += s.tail.row - s.head.row;
    }
  }

  /// Pulls both endpoints through `other`.
  pub fn pull_by(&mut self, other: &Selection) {
    other.pull(&mut self.head);
    other.pull(&mut self.tail);
  }

  /// Pushes both endpoints through `other`.
  pub fn push_by(&mut self, other: &Selection) {
    other.push(&mut self.head);
    other.push(&mut self.tail);
  }
}
