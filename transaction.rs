//! Edit transactions.
//!
//! A [`Transaction`] is a value describing one edit: the selection it
//! replaces, the content that goes in its place, and a direction telling the
//! document which end of the result the caret lands on. Applying a
//! transaction yields its *reciprocal*, a transaction that undoes it;
//! applying the reciprocal yields the original edit back. Transactions are
//! plain data, so histories are lists of them rather than captured closures.
//!
//! Raw keystrokes arrive as a trailing control code on the content and are
//! rewritten by [`Transaction::normalized`] before application: a tab becomes
//! four spaces, backspace and delete become an empty replacement over the
//! neighboring character slot.

use std::ops::RangeInclusive;

use crate::{
  Tendril,
  line_store::LineStore,
  movement::Direction,
  position::Index,
  selection::Selection,
};

pub const TAB_CODE: char = '\t';
pub const BACKSPACE_CODE: char = '\u{8}';
pub const DELETE_CODE: char = '\u{7f}';

/// Invalidation hint carried by reciprocals: which rows presentation caches
/// must drop after the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffectedArea {
  WholeDocument,
  Rows { first: usize, last: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
  pub selection: Selection,
  pub content:   Tendril,
  pub direction: Direction,
  pub affected:  AffectedArea,
}

impl Transaction {
  /// Insert `content` at a bare caret.
  pub fn insert(at: impl Into<Index>, content: impl Into<Tendril>) -> Self {
    Self::replace(Selection::caret(at), content)
  }

  /// Replace `selection` with `content`.
  pub fn replace(selection: Selection, content: impl Into<Tendril>) -> Self {
    Self {
      selection,
      content: content.into(),
      direction: Direction::Forward,
      affected: AffectedArea::WholeDocument,
    }
  }

  #[must_use]
  pub fn with_direction(mut self, direction: Direction) -> Self {
    self.direction = direction;
    self
  }

  /// Rows a cache must invalidate, resolved against the store after the
  /// edit.
  pub fn affected_rows(&self, store: &LineStore) -> RangeInclusive<usize> {
    match self.affected {
      AffectedArea::WholeDocument => 0..=store.num_rows() - 1,
      AffectedArea::Rows { first, last } => first..=last,
    }
  }

  /// Rewrites a trailing input code into its edit.
  ///
  /// Backspace and delete widen a singular selection by one character slot
  /// (backward or forward) and clear the content; at the document edges the
  /// widening is a no-op, so the whole transaction is. A trailing tab
  /// becomes four spaces.
  #[must_use]
  pub fn normalized(&self, store: &LineStore) -> Self {
    let mut t = self.clone();
    match t.content.chars().last() {
      Some(TAB_CODE) => {
        t.content.pop();
        t.content.push_str("    ");
      },
      Some(BACKSPACE_CODE) => {
        if t.selection.is_singular() {
          store.prev(&mut t.selection.head);
        }
        t.content.clear();
      },
      Some(DELETE_CODE) => {
        if t.selection.is_singular() {
          store.next(&mut t.selection.head);
        }
        t.content.clear();
      },
      _ => {},
    }
    t
  }
}
