//! Serializable document state.
//!
//! The persisted shape is deliberately plain: the line texts and the
//! selection endpoints as `(head_row, head_col, tail_row, tail_col)` tuples.
//! Snapshots are external input on the way back in, so restore validates
//! everything instead of trusting it.

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::{
  document::TextDocument,
  selection::Selection,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
  #[error("snapshot must contain at least one line")]
  NoLines,
  #[error("snapshot must contain at least one selection")]
  NoSelections,
  #[error("selection endpoint ({row}, {col}) is out of bounds")]
  SelectionOutOfBounds { row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
  pub lines:      Vec<String>,
  pub selections: Vec<(usize, usize, usize, usize)>,
}

impl DocumentSnapshot {
  pub fn capture(document: &TextDocument) -> Self {
    Self {
      lines:      document.line_store().lines().map(str::to_owned).collect(),
      selections: document
        .selections()
        .iter()
        .map(|s| (s.head.row, s.head.col, s.tail.row, s.tail.col))
        .collect(),
    }
  }

  pub fn restore(&self) -> Result<TextDocument, SnapshotError> {
    if self.lines.is_empty() {
      return Err(SnapshotError::NoLines);
    }
    if self.selections.is_empty() {
      return Err(SnapshotError::NoSelections);
    }

    let mut document = TextDocument::from_content(&self.lines.join("\n"));
    let selections: Vec<Selection> = self
      .selections
      .iter()
      .map(|&(head_row, head_col, tail_row, tail_col)| {
        Selection::new((head_row, head_col), (tail_row, tail_col))
      })
      .collect();

    for selection in &selections {
      for endpoint in [selection.head, selection.tail] {
        if endpoint.row >= document.num_rows()
          || endpoint.col > document.num_columns(endpoint.row)
        {
          return Err(SnapshotError::SelectionOutOfBounds {
            row: endpoint.row,
            col: endpoint.col,
          });
        }
      }
    }

    document
      .set_selections(selections)
      .map_err(|_| SnapshotError::NoSelections)?;
    Ok(document)
  }
}
