use serde::{
  Deserialize,
  Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
  Forward,
  Backward,
}

impl Direction {
  #[inline]
  #[must_use]
  pub fn flipped(self) -> Self {
    match self {
      Direction::Forward => Direction::Backward,
      Direction::Backward => Direction::Forward,
    }
  }
}

/// Selection motions understood by the document.
///
/// The first four produce a selection outright. The directional variants move
/// the head one step; whether the tail follows is the caller's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
  /// Leave the selection untouched.
  Identity,
  /// Select the entire document.
  WholeDocument,
  /// Expand to full lines over the rows the selection touches.
  WholeLine,
  /// Select the whitespace-delimited word around the head.
  WholeWord,
  ForwardByChar,
  BackwardByChar,
  ForwardByWord,
  BackwardByWord,
  ForwardByLine,
  BackwardByLine,
  ToLineStart,
  ToLineEnd,
}
