//! Document state and the transactional edit path.
//!
//! [`TextDocument`] owns the line store, the ordered multi-selection list,
//! and per-character style tokens. All mutation funnels through
//! [`TextDocument::fulfill`]: it applies one [`Transaction`] atomically,
//! re-anchors every sibling selection around the edit, and returns the
//! reciprocal transaction that undoes it. Navigation
//! ([`TextDocument::get_selections`]) is pure and never touches state.
//!
//! The selection list always holds at least one entry, and the store always
//! holds at least one row. Transactions are trusted input: an out-of-bounds
//! transaction selection is a caller bug, checked in debug builds. External
//! selection lists go through [`TextDocument::set_selections`], which
//! validates instead.

use smallvec::{
  SmallVec,
  smallvec,
};
use thiserror::Error;
use tracing::{
  debug,
  trace,
};

use crate::{
  chars::{
    char_is_whitespace,
    char_len,
    char_slice,
  },
  line_store::LineStore,
  movement::{
    Direction,
    Navigation,
  },
  position::Index,
  selection::Selection,
  transaction::{
    AffectedArea,
    Transaction,
  },
};

pub type StyleToken = u32;

pub const DEFAULT_STYLE: StyleToken = 0;

#[derive(Debug, Error)]
pub enum DocumentError {
  #[error("selection list must not be empty")]
  EmptySelections,
  #[error("selection endpoint {0:?} is out of bounds")]
  SelectionOutOfBounds(Index),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Clone)]
pub struct TextDocument {
  store:      LineStore,
  selections: SmallVec<[Selection; 1]>,
  styles:     Vec<Vec<StyleToken>>,
}

impl Default for TextDocument {
  fn default() -> Self {
    Self::new()
  }
}

impl TextDocument {
  pub fn new() -> Self {
    Self {
      store:      LineStore::new(),
      selections: smallvec![Selection::caret(Index::zero())],
      styles:     vec![Vec::new()],
    }
  }

  pub fn from_content(content: &str) -> Self {
    let mut document = Self::new();
    document.replace_all(content);
    document
  }

  /// Resets the whole document: new text, a single caret at the origin,
  /// default styles.
  pub fn replace_all(&mut self, content: &str) {
    self.store = LineStore::from_content(content);
    self.selections = smallvec![Selection::caret(Index::zero())];
    self.styles = self
      .store
      .lines()
      .map(|line| vec![DEFAULT_STYLE; char_len(line)])
      .collect();
    debug!(rows = self.store.num_rows(), "replace_all");
  }

  #[inline]
  pub fn line_store(&self) -> &LineStore {
    &self.store
  }

  #[inline]
  pub fn num_rows(&self) -> usize {
    self.store.num_rows()
  }

  #[inline]
  pub fn num_columns(&self, row: usize) -> usize {
    self.store.num_columns(row)
  }

  #[inline]
  pub fn line(&self, row: usize) -> &str {
    self.store.line(row)
  }

  #[inline]
  pub fn char_at(&self, index: Index) -> char {
    self.store.char_at(index)
  }

  #[inline]
  pub fn end(&self) -> Index {
    self.store.end()
  }

  /// Full text, rows joined with `'\n'`.
  pub fn content(&self) -> String {
    self.store.lines().collect::<Vec<_>>().join("\n")
  }

  pub fn selections(&self) -> &[Selection] {
    &self.selections
  }

  /// Replaces the selection list. External input: validated, not trusted.
  pub fn set_selections(&mut self, selections: impl IntoIterator<Item = Selection>) -> Result<()> {
    let selections: SmallVec<[Selection; 1]> = selections.into_iter().collect();
    if selections.is_empty() {
      return Err(DocumentError::EmptySelections);
    }
    for selection in &selections {
      for endpoint in [selection.head, selection.tail] {
        if !self.index_in_bounds(endpoint) {
          return Err(DocumentError::SelectionOutOfBounds(endpoint));
        }
      }
    }
    self.selections = selections;
    Ok(())
  }

  fn index_in_bounds(&self, index: Index) -> bool {
    index.row < self.store.num_rows() && index.col <= self.store.num_columns(index.row)
  }

  fn clamped(&self, index: Index) -> Index {
    let row = index.row.min(self.store.num_rows() - 1);
    Index::new(row, index.col.min(self.store.num_columns(row)))
  }

  /// Computes where every selection would move under `navigation`, without
  /// changing any state. With `fixing_tail` the tail stays anchored;
  /// otherwise it collapses onto the head. The whole-span navigations set
  /// both endpoints themselves.
  pub fn get_selections(
    &self,
    navigation: Navigation,
    fixing_tail: bool,
  ) -> SmallVec<[Selection; 1]> {
    self
      .selections
      .iter()
      .map(|s| self.navigated(*s, navigation, fixing_tail))
      .collect()
  }

  fn navigated(&self, s: Selection, navigation: Navigation, fixing_tail: bool) -> Selection {
    use Navigation::*;

    let mut head = self.clamped(s.head);
    match navigation {
      Identity => return s,
      WholeDocument => return Selection::new(Index::zero(), self.store.last_index()),
      WholeLine => {
        let o = s.oriented();
        let tail_row = o.tail.row.min(self.store.num_rows() - 1);
        return Selection::new(
          Index::new(o.head.row.min(tail_row), 0),
          Index::new(tail_row, self.store.num_columns(tail_row)),
        );
      },
      WholeWord => return self.word_around(head),
      ForwardByChar => {
        self.store.next(&mut head);
      },
      BackwardByChar => {
        self.store.prev(&mut head);
      },
      ForwardByWord => self.next_word_boundary(&mut head),
      BackwardByWord => self.prev_word_boundary(&mut head),
      ForwardByLine => {
        if head.row + 1 < self.store.num_rows() {
          head.row += 1;
          head.col = head.col.min(self.store.num_columns(head.row));
        }
      },
      BackwardByLine => {
        if head.row > 0 {
          head.row -= 1;
          head.col = head.col.min(self.store.num_columns(head.row));
        }
      },
      ToLineStart => head.col = 0,
      ToLineEnd => head.col = self.store.num_columns(head.row),
    }

    // A computed head never rests on the end sentinel.
    if head == self.store.end() {
      self.store.prev(&mut head);
    }

    Selection {
      head,
      tail: if fixing_tail { s.tail } else { head },
    }
  }

  /// Skips the whitespace run under the head, then the word, landing on the
  /// following boundary. Line endings count as whitespace.
  fn next_word_boundary(&self, index: &mut Index) {
    while char_is_whitespace(self.store.char_at(*index)) {
      if !self.store.next(index) {
        return;
      }
    }
    while !char_is_whitespace(self.store.char_at(*index)) {
      if !self.store.next(index) {
        return;
      }
    }
  }

  fn prev_word_boundary(&self, index: &mut Index) {
    loop {
      let mut probe = *index;
      if !self.store.prev(&mut probe) {
        return;
      }
      if char_is_whitespace(self.store.char_at(probe)) {
        *index = probe;
      } else {
        break;
      }
    }
    loop {
      let mut probe = *index;
      if !self.store.prev(&mut probe) {
        return;
      }
      if char_is_whitespace(self.store.char_at(probe)) {
        return;
      }
      *index = probe;
    }
  }

  /// The whitespace-delimited word around `index`, caret at the word's end.
  fn word_around(&self, index: Index) -> Selection {
    let index = self.clamped(index);
    let line: Vec<char> = self.store.line(index.row).chars().collect();
    let mut begin = index.col;
    let mut end = index.col;
    while begin > 0 && !char_is_whitespace(line[begin - 1]) {
      begin -= 1;
    }
    while end < line.len() && !char_is_whitespace(line[end]) {
      end += 1;
    }
    Selection::new(Index::new(index.row, end), Index::new(index.row, begin))
  }

  /// Text covered by `selection`, multi-row spans joined with `'\n'`.
  pub fn get_selection_content(&self, selection: &Selection) -> String {
    let s = selection.oriented();
    if s.is_single_line() {
      return char_slice(self.store.line(s.head.row), s.head.col, s.tail.col).to_owned();
    }

    let head_line = self.store.line(s.head.row);
    let mut content =
      char_slice(head_line, s.head.col, char_len(head_line)).to_owned();
    for row in s.head.row + 1..s.tail.row {
      content.push('\n');
      content.push_str(self.store.line(row));
    }
    content.push('\n');
    content.push_str(char_slice(self.store.line(s.tail.row), 0, s.tail.col));
    content
  }

  /// Applies `transaction` atomically and returns its reciprocal.
  ///
  /// The edited span is replaced by the transaction's content. Sibling
  /// selections are pulled over the removed span and pushed over the
  /// inserted one; the stored selection matching the transaction's collapses
  /// to a caret at the direction-chosen end of the insertion. Applying the
  /// returned reciprocal restores the text and the siblings.
  pub fn fulfill(&mut self, transaction: &Transaction) -> Transaction {
    let t = transaction.normalized(&self.store);
    let s = t.selection.oriented();
    debug_assert!(self.index_in_bounds(s.head));
    debug_assert!(self.index_in_bounds(s.tail));

    // Whole-line text of the touched rows, and the edited span's char
    // offsets inside it.
    let whole_lines = self.get_selection_content(&s.horizontally_maximized(&self.store));
    let i = s.head.col;
    let j = match last_line_break(&whole_lines) {
      Some(at) => at + 1 + s.tail.col,
      None => s.tail.col,
    };
    let removed = char_slice(&whole_lines, i, j).to_owned();

    let mut merged = String::with_capacity(whole_lines.len() + t.content.len());
    merged.push_str(char_slice(&whole_lines, 0, i));
    merged.push_str(&t.content);
    merged.push_str(char_slice(&whole_lines, j, char_len(&whole_lines)));

    let inserted = Selection::measuring(&t.content).starting_from(s.head);

    for sibling in &mut self.selections {
      if *sibling == transaction.selection {
        continue;
      }
      sibling.pull_by(&s);
      sibling.push_by(&inserted);
    }

    let landing = match t.direction {
      Direction::Forward => inserted.tail,
      Direction::Backward => inserted.head,
    };
    if let Some(edited) = self
      .selections
      .iter_mut()
      .find(|sel| **sel == transaction.selection)
    {
      *edited = Selection::caret(landing);
    }

    // Splitting on '\n' never yields an empty iterator, so the store never
    // drops below one row.
    let new_rows: Vec<String> = merged.split('\n').map(str::to_owned).collect();
    let new_styles: Vec<Vec<StyleToken>> = new_rows
      .iter()
      .map(|line| vec![DEFAULT_STYLE; char_len(line)])
      .collect();
    self.store.replace_rows(s.head.row..=s.tail.row, new_rows);
    self.styles.splice(s.head.row..=s.tail.row, new_styles);

    trace!(
      first_row = s.head.row,
      last_row = s.tail.row,
      inserted = t.content.len(),
      removed = removed.len(),
      "fulfill"
    );

    Transaction {
      selection: inserted,
      content:   removed.into(),
      direction: t.direction.flipped(),
      affected:  AffectedArea::WholeDocument,
    }
  }

  /// Paints `token` over the zone's per-row column ranges. Zones are
  /// external input and get clamped.
  pub fn apply_style_token(&mut self, token: StyleToken, zone: &Selection) {
    let z = zone.oriented();
    let last_row = self.store.num_rows() - 1;
    for row in z.head.row..=z.tail.row.min(last_row) {
      let num_columns = self.store.num_columns(row);
      let (from, to) = zone.column_range_on_row(row, num_columns);
      let to = to.min(num_columns);
      let from = from.min(to);
      for slot in &mut self.styles[row][from..to] {
        *slot = token;
      }
    }
  }

  /// Token at `index`; virtual line-ending slots read as the default.
  pub fn style_token_at(&self, index: Index) -> StyleToken {
    self
      .styles
      .get(index.row)
      .and_then(|row| row.get(index.col))
      .copied()
      .unwrap_or(DEFAULT_STYLE)
  }
}

fn last_line_break(text: &str) -> Option<usize> {
  text
    .chars()
    .enumerate()
    .filter(|(_, ch)| *ch == '\n')
    .map(|(at, _)| at)
    .last()
}

#[cfg(test)]
mod test {
  use quickcheck::quickcheck;

  use super::*;
  use crate::transaction::BACKSPACE_CODE;

  fn carets(document: &TextDocument) -> Vec<Index> {
    document.selections().iter().map(|s| s.head).collect()
  }

  #[test]
  fn test_new_document_is_one_empty_row() {
    let document = TextDocument::new();
    assert_eq!(document.num_rows(), 1);
    assert_eq!(document.line(0), "");
    assert_eq!(document.selections(), [Selection::caret((0, 0))]);
  }

  #[test]
  fn test_replace_all_reseeds_caret() {
    let mut document = TextDocument::from_content("abc\ndef");
    document
      .set_selections([Selection::caret((1, 2))])
      .unwrap();
    document.replace_all("");
    assert_eq!(document.num_rows(), 1);
    assert_eq!(document.selections(), [Selection::caret((0, 0))]);
  }

  #[test]
  fn test_set_selections_rejects_empty() {
    let mut document = TextDocument::from_content("ab");
    assert!(matches!(
      document.set_selections([]),
      Err(DocumentError::EmptySelections)
    ));
  }

  #[test]
  fn test_set_selections_rejects_out_of_bounds() {
    let mut document = TextDocument::from_content("ab");
    assert!(matches!(
      document.set_selections([Selection::caret((0, 3))]),
      Err(DocumentError::SelectionOutOfBounds(_))
    ));
    assert!(matches!(
      document.set_selections([Selection::caret((1, 0))]),
      Err(DocumentError::SelectionOutOfBounds(_))
    ));
    // The virtual line-ending slot is addressable.
    assert!(document.set_selections([Selection::caret((0, 2))]).is_ok());
  }

  #[test]
  fn test_insert_newline_splits_row() {
    let mut document = TextDocument::from_content("abc\ndef");
    document
      .set_selections([Selection::caret((0, 3))])
      .unwrap();

    let reciprocal = document.fulfill(&Transaction::insert((0, 3), "\n"));

    assert_eq!(document.content(), "abc\n\ndef");
    assert_eq!(reciprocal.selection, Selection::new((0, 3), (1, 0)));
    assert_eq!(reciprocal.content.as_str(), "");
    assert_eq!(reciprocal.direction, Direction::Backward);
  }

  #[test]
  fn test_reciprocal_of_newline_rejoins_rows() {
    let mut document = TextDocument::from_content("abc\ndef");
    document
      .set_selections([Selection::caret((0, 3))])
      .unwrap();

    let reciprocal = document.fulfill(&Transaction::insert((0, 3), "\n"));
    document.fulfill(&reciprocal);

    assert_eq!(document.content(), "abc\ndef");
  }

  #[test]
  fn test_two_carets_insert_shifts_sibling() {
    let mut document = TextDocument::from_content("abcd");
    document
      .set_selections([Selection::caret((0, 1)), Selection::caret((0, 3))])
      .unwrap();

    document.fulfill(&Transaction::insert((0, 1), "x"));
    assert_eq!(document.content(), "axbcd");
    assert_eq!(carets(&document), [Index::new(0, 2), Index::new(0, 4)]);

    document.fulfill(&Transaction::insert((0, 4), "x"));
    assert_eq!(document.content(), "axbcxd");
    assert_eq!(carets(&document), [Index::new(0, 2), Index::new(0, 5)]);
  }

  #[test]
  fn test_sibling_on_later_row_follows_line_break_insert() {
    let mut document = TextDocument::from_content("abc\ndef");
    document
      .set_selections([Selection::caret((0, 1)), Selection::caret((1, 2))])
      .unwrap();

    document.fulfill(&Transaction::insert((0, 1), "x\ny"));

    assert_eq!(document.content(), "ax\nybc\ndef");
    assert_eq!(carets(&document), [Index::new(1, 1), Index::new(2, 2)]);
  }

  #[test]
  fn test_backspace_at_origin_is_noop() {
    let mut document = TextDocument::from_content("ab");
    let before = document.clone();

    let reciprocal =
      document.fulfill(&Transaction::insert((0, 0), BACKSPACE_CODE.to_string()));

    assert_eq!(document.content(), before.content());
    assert_eq!(document.selections(), before.selections());
    assert_eq!(reciprocal.content.as_str(), "");
    assert!(reciprocal.selection.is_singular());
  }

  #[test]
  fn test_backspace_joins_rows() {
    let mut document = TextDocument::from_content("ab\ncd");
    document
      .set_selections([Selection::caret((1, 0))])
      .unwrap();

    document.fulfill(&Transaction::insert((1, 0), BACKSPACE_CODE.to_string()));

    assert_eq!(document.content(), "abcd");
    assert_eq!(carets(&document), [Index::new(0, 2)]);
  }

  #[test]
  fn test_replace_span_collapses_to_caret_at_tail() {
    let mut document = TextDocument::from_content("hello world");
    let span = Selection::new((0, 0), (0, 5));
    document.set_selections([span]).unwrap();

    let reciprocal = document.fulfill(&Transaction::replace(span, "goodbye"));

    assert_eq!(document.content(), "goodbye world");
    assert_eq!(document.selections(), [Selection::caret((0, 7))]);
    assert_eq!(reciprocal.content.as_str(), "hello");
  }

  #[test]
  fn test_multi_line_replace_round_trip() {
    let mut document = TextDocument::from_content("one\ntwo\nthree\nfour");
    let span = Selection::new((0, 2), (2, 3));
    document.set_selections([span]).unwrap();

    let reciprocal = document.fulfill(&Transaction::replace(span, "X\nY"));
    assert_eq!(document.content(), "onX\nYee\nfour");

    document.fulfill(&reciprocal);
    assert_eq!(document.content(), "one\ntwo\nthree\nfour");
  }

  #[test]
  fn test_delete_whole_content_keeps_one_row() {
    let mut document = TextDocument::from_content("abc\ndef");
    let span = Selection::new((0, 0), (1, 3));
    document.set_selections([span]).unwrap();

    document.fulfill(&Transaction::replace(span, ""));

    assert_eq!(document.num_rows(), 1);
    assert_eq!(document.content(), "");
  }

  #[test]
  fn test_navigation_is_pure() {
    let document = TextDocument::from_content("abc def");
    let before = document.selections().to_vec();

    let moved = document.get_selections(Navigation::ForwardByWord, false);

    assert_eq!(document.selections(), before.as_slice());
    assert_ne!(moved.as_slice(), before.as_slice());
  }

  #[test]
  fn test_identity_navigation_is_fixed_point() {
    let mut document = TextDocument::from_content("abc");
    document
      .set_selections([Selection::new((0, 1), (0, 3))])
      .unwrap();

    let moved = document.get_selections(Navigation::Identity, false);
    assert_eq!(moved.as_slice(), document.selections());
  }

  #[test]
  fn test_forward_by_word_skips_whitespace_run() {
    let document = TextDocument::from_content("foo  bar");

    let from_start = document.get_selections(Navigation::ForwardByWord, false);
    assert_eq!(from_start[0].head, Index::new(0, 3));

    let mut document = document;
    document.set_selections([Selection::caret((0, 3))]).unwrap();
    let next = document.get_selections(Navigation::ForwardByWord, false);
    assert_eq!(next[0].head, Index::new(0, 8));
  }

  #[test]
  fn test_backward_by_word() {
    let mut document = TextDocument::from_content("foo  bar");
    document.set_selections([Selection::caret((0, 8))]).unwrap();

    let moved = document.get_selections(Navigation::BackwardByWord, false);
    assert_eq!(moved[0].head, Index::new(0, 5));
  }

  #[test]
  fn test_forward_by_word_crosses_rows() {
    let mut document = TextDocument::from_content("foo\nbar");
    document.set_selections([Selection::caret((0, 3))]).unwrap();

    let moved = document.get_selections(Navigation::ForwardByWord, false);
    assert_eq!(moved[0].head, Index::new(1, 3));
  }

  #[test]
  fn test_forward_navigation_never_rests_on_sentinel() {
    let mut document = TextDocument::from_content("ab");
    document.set_selections([Selection::caret((0, 2))]).unwrap();

    for navigation in [
      Navigation::ForwardByChar,
      Navigation::ForwardByWord,
      Navigation::ForwardByLine,
      Navigation::ToLineEnd,
    ] {
      let moved = document.get_selections(navigation, false);
      assert_ne!(moved[0].head, document.end(), "{navigation:?}");
      assert_eq!(moved[0].head, Index::new(0, 2), "{navigation:?}");
    }
  }

  #[test]
  fn test_fixing_tail_extends_selection() {
    let mut document = TextDocument::from_content("abc");
    document.set_selections([Selection::caret((0, 0))]).unwrap();

    let extended = document.get_selections(Navigation::ForwardByChar, true);
    assert_eq!(extended[0], Selection::new((0, 1), (0, 0)));

    let collapsed = document.get_selections(Navigation::ForwardByChar, false);
    assert_eq!(collapsed[0], Selection::caret((0, 1)));
  }

  #[test]
  fn test_line_navigation_clamps_column() {
    let mut document = TextDocument::from_content("abcdef\nab");
    document.set_selections([Selection::caret((0, 5))]).unwrap();

    let down = document.get_selections(Navigation::ForwardByLine, false);
    assert_eq!(down[0].head, Index::new(1, 2));
  }

  #[test]
  fn test_whole_document_navigation() {
    let document = TextDocument::from_content("abc\nde");
    let moved = document.get_selections(Navigation::WholeDocument, false);
    assert_eq!(moved[0], Selection::new((0, 0), (1, 2)));
  }

  #[test]
  fn test_whole_line_navigation() {
    let mut document = TextDocument::from_content("abc\ndefg\nhi");
    document
      .set_selections([Selection::new((1, 2), (0, 1))])
      .unwrap();

    let moved = document.get_selections(Navigation::WholeLine, false);
    assert_eq!(moved[0], Selection::new((0, 0), (1, 4)));
  }

  #[test]
  fn test_whole_word_navigation() {
    let mut document = TextDocument::from_content("foo bar baz");
    document.set_selections([Selection::caret((0, 5))]).unwrap();

    let moved = document.get_selections(Navigation::WholeWord, false);
    assert_eq!(moved[0], Selection::new((0, 7), (0, 4)));
  }

  #[test]
  fn test_line_start_and_end() {
    let mut document = TextDocument::from_content("abcdef");
    document.set_selections([Selection::caret((0, 3))]).unwrap();

    assert_eq!(
      document.get_selections(Navigation::ToLineStart, false)[0].head,
      Index::new(0, 0)
    );
    assert_eq!(
      document.get_selections(Navigation::ToLineEnd, false)[0].head,
      Index::new(0, 6)
    );
  }

  #[test]
  fn test_get_selection_content_multi_line() {
    let document = TextDocument::from_content("abc\ndef\nghi");
    let span = Selection::new((0, 1), (2, 2));
    assert_eq!(document.get_selection_content(&span), "bc\ndef\ngh");
    assert_eq!(
      document.get_selection_content(&span.swapped()),
      "bc\ndef\ngh"
    );
  }

  #[test]
  fn test_style_tokens_apply_and_read() {
    let mut document = TextDocument::from_content("abc\ndef");
    document.apply_style_token(7, &Selection::new((0, 1), (1, 2)));

    assert_eq!(document.style_token_at(Index::new(0, 0)), DEFAULT_STYLE);
    assert_eq!(document.style_token_at(Index::new(0, 1)), 7);
    assert_eq!(document.style_token_at(Index::new(0, 2)), 7);
    assert_eq!(document.style_token_at(Index::new(1, 1)), 7);
    assert_eq!(document.style_token_at(Index::new(1, 2)), DEFAULT_STYLE);
  }

  #[test]
  fn test_fulfill_resets_styles_on_touched_rows() {
    let mut document = TextDocument::from_content("abc\ndef");
    document.apply_style_token(7, &Selection::new((0, 0), (1, 3)));

    document.fulfill(&Transaction::insert((0, 1), "x"));

    assert_eq!(document.style_token_at(Index::new(0, 2)), DEFAULT_STYLE);
    assert_eq!(document.style_token_at(Index::new(1, 1)), 7);
  }

  #[test]
  fn test_reciprocal_carries_whole_document_hint() {
    let mut document = TextDocument::from_content("abc\ndef");
    let reciprocal = document.fulfill(&Transaction::insert((0, 0), "x"));
    assert_eq!(
      reciprocal.affected_rows(document.line_store()),
      0..=document.num_rows() - 1
    );
  }

  fn clamped_index(document: &TextDocument, row_seed: usize, col_seed: usize) -> Index {
    let row = row_seed % document.num_rows();
    Index::new(row, col_seed % (document.num_columns(row) + 1))
  }

  quickcheck! {
    fn round_trip_restores_lines(
      content: String,
      a: usize,
      b: usize,
      c: usize,
      d: usize,
      replacement: String
    ) -> bool {
      let mut document = TextDocument::from_content(&content);
      let head = clamped_index(&document, a, b);
      let tail = clamped_index(&document, c, d);
      let before = document.content();

      let reciprocal =
        document.fulfill(&Transaction::replace(Selection::new(head, tail), replacement));
      document.fulfill(&reciprocal);

      document.content() == before
    }

    fn round_trip_restores_sibling_carets(
      content: String,
      row_seed: usize,
      c0: usize,
      c1: usize,
      replacement: String,
      sibling_seeds: Vec<(usize, usize)>
    ) -> bool {
      let mut document = TextDocument::from_content(&content);
      let row = row_seed % document.num_rows();
      let len = document.num_columns(row);
      let mut c0 = c0 % (len + 1);
      let mut c1 = c1 % (len + 1);
      if c0 > c1 {
        std::mem::swap(&mut c0, &mut c1);
      }
      let edited = Selection::new((row, c0), (row, c1));
      let replacement = if replacement.is_empty() {
        "q".to_owned()
      } else {
        replacement
      };

      // Sibling carets anywhere outside the edited span's columns.
      let mut selections = vec![edited];
      for (a, b) in sibling_seeds {
        let caret = clamped_index(&document, a, b);
        if caret.row == row && c0 < c1 && caret.col >= c0 && caret.col < c1 {
          continue;
        }
        if Selection::caret(caret) == edited {
          continue;
        }
        selections.push(Selection::caret(caret));
      }
      let siblings_before: Vec<Selection> = selections[1..].to_vec();
      if document.set_selections(selections).is_err() {
        return true;
      }

      let reciprocal = document.fulfill(&Transaction::replace(edited, replacement));
      document.fulfill(&reciprocal);

      document.selections()[1..] == siblings_before[..]
    }
  }
}
