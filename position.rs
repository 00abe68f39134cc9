use serde::{
  Deserialize,
  Serialize,
};

use crate::chars::char_is_line_ending;

/// A single point in a text buffer, addressed as (row, column).
/// 0-indexed as all things should be. Ordering is row-major.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Index {
  pub row: usize,
  pub col: usize,
}

impl Index {
  pub fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn zero() -> Self {
    Self { row: 0, col: 0 }
  }

  pub const fn is_zero(&self) -> bool {
    self.row == 0 && self.col == 0
  }

  /// Walks `text` from this index and returns the index just past it.
  /// Rows advance on line endings, resetting the column.
  pub fn traverse(self, text: impl AsRef<str>) -> Self {
    let Self { mut row, mut col } = self;

    for ch in text.as_ref().chars() {
      if char_is_line_ending(ch) {
        row += 1;
        col = 0;
      } else {
        col += 1;
      }
    }

    Self { row, col }
  }
}

impl From<(usize, usize)> for Index {
  fn from(value: (usize, usize)) -> Self {
    Index::new(value.0, value.1)
  }
}
