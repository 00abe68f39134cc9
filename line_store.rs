//! Ordered store of line strings.
//!
//! The store is purely text: an array of rows addressed by [`Index`]. It is
//! never empty, holding at least one (possibly empty) row. Columns count
//! chars, and every row exposes one virtual `'\n'` slot at `col ==
//! num_columns(row)`. One extra index, the end sentinel `(num_rows, 0)`,
//! addresses the position just past the buffer.

use std::ops::RangeInclusive;

use crate::{
  chars::char_len,
  position::Index,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStore {
  lines: Vec<String>,
}

impl Default for LineStore {
  fn default() -> Self {
    Self::new()
  }
}

impl LineStore {
  pub fn new() -> Self {
    Self {
      lines: vec![String::new()],
    }
  }

  /// Splits `content` on `'\n'`. Empty input yields one empty row.
  pub fn from_content(content: &str) -> Self {
    Self {
      lines: content.split('\n').map(str::to_owned).collect(),
    }
  }

  #[inline]
  pub fn num_rows(&self) -> usize {
    self.lines.len()
  }

  /// Char count of `row`, excluding the virtual line ending.
  #[inline]
  pub fn num_columns(&self, row: usize) -> usize {
    char_len(&self.lines[row])
  }

  #[inline]
  pub fn line(&self, row: usize) -> &str {
    &self.lines[row]
  }

  pub fn lines(&self) -> impl Iterator<Item = &str> {
    self.lines.iter().map(String::as_str)
  }

  /// The sentinel index just past the buffer.
  #[inline]
  pub fn end(&self) -> Index {
    Index::new(self.num_rows(), 0)
  }

  /// Last addressable character slot: the virtual line ending of the last
  /// row.
  pub fn last_index(&self) -> Index {
    let row = self.num_rows() - 1;
    Index::new(row, self.num_columns(row))
  }

  /// Character at `index`, where `col == num_columns(row)` and the end
  /// sentinel both read as `'\n'`. Out-of-bounds indices are a contract
  /// violation.
  pub fn char_at(&self, index: Index) -> char {
    if index == self.end() {
      return '\n';
    }
    let line = &self.lines[index.row];
    match line.chars().nth(index.col) {
      Some(ch) => ch,
      None => {
        debug_assert_eq!(index.col, char_len(line));
        '\n'
      },
    }
  }

  /// Steps `index` one character slot forward, crossing line boundaries.
  /// Returns false (leaving `index` untouched) at the last slot.
  pub fn next(&self, index: &mut Index) -> bool {
    if index.col < self.num_columns(index.row) {
      index.col += 1;
      true
    } else if index.row + 1 < self.num_rows() {
      index.row += 1;
      index.col = 0;
      true
    } else {
      false
    }
  }

  /// Steps `index` one character slot backward. Returns false at `(0, 0)`.
  pub fn prev(&self, index: &mut Index) -> bool {
    if index.col > 0 {
      index.col -= 1;
      true
    } else if index.row > 0 {
      index.row -= 1;
      index.col = self.num_columns(index.row);
      true
    } else {
      false
    }
  }

  /// Replaces a contiguous row range with a new sequence of rows. The
  /// replacement must be non-empty so the store never drops below one row.
  pub fn replace_rows(
    &mut self,
    rows: RangeInclusive<usize>,
    new_rows: impl IntoIterator<Item = String>,
  ) {
    self.lines.splice(rows, new_rows);
    debug_assert!(!self.lines.is_empty());
  }
}
