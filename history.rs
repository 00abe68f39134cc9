use std::time::{
  Duration,
  Instant,
};

use tracing::debug;

use crate::{
  document::TextDocument,
  movement::Direction,
  position::Index,
  selection::Selection,
  transaction::Transaction,
};

/// Edits committed within this window of the previous one join its undo
/// group.
pub const COALESCE_WINDOW: Duration = Duration::from_millis(400);

#[derive(Debug, Default)]
struct UndoGroup {
  reciprocals: Vec<Transaction>,
}

/// Grouped undo/redo over a [`TextDocument`].
///
/// Every edit goes through [`UndoEngine::perform`], which applies the
/// transaction and keeps its reciprocal. Rapid edits coalesce into one
/// group; a burst of per-caret transactions from a single keystroke goes
/// through [`UndoEngine::perform_batch`] and always lands in one group.
/// Undo and redo replay a whole group and report whether there was anything
/// to replay; they never fail.
#[derive(Debug, Default)]
pub struct UndoEngine {
  undo:        Vec<UndoGroup>,
  redo:        Vec<UndoGroup>,
  last_commit: Option<Instant>,
}

impl UndoEngine {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn undo_depth(&self) -> usize {
    self.undo.len()
  }

  pub fn redo_depth(&self) -> usize {
    self.redo.len()
  }

  pub fn perform(&mut self, document: &mut TextDocument, transaction: &Transaction) {
    self.perform_at(document, transaction, Instant::now());
  }

  /// [`UndoEngine::perform`] with an explicit clock, for tests.
  pub fn perform_at(
    &mut self,
    document: &mut TextDocument,
    transaction: &Transaction,
    now: Instant,
  ) {
    let reciprocal = document.fulfill(transaction);
    self.record(reciprocal, now);
  }

  /// Applies one transaction per caret, recording all reciprocals in a
  /// single undo group.
  pub fn perform_batch(&mut self, document: &mut TextDocument, transactions: &[Transaction]) {
    self.perform_batch_at(document, transactions, Instant::now());
  }

  pub fn perform_batch_at(
    &mut self,
    document: &mut TextDocument,
    transactions: &[Transaction],
    now: Instant,
  ) {
    let mut opened = false;
    for transaction in transactions {
      let reciprocal = document.fulfill(transaction);
      if !opened {
        self.record(reciprocal, now);
        opened = true;
      } else if let Some(group) = self.undo.last_mut() {
        group.reciprocals.push(reciprocal);
      }
    }
  }

  fn record(&mut self, reciprocal: Transaction, now: Instant) {
    self.redo.clear();
    let coalesce = match self.last_commit {
      Some(prev) => now.duration_since(prev) <= COALESCE_WINDOW && !self.undo.is_empty(),
      None => false,
    };
    if coalesce {
      if let Some(group) = self.undo.last_mut() {
        group.reciprocals.push(reciprocal);
      }
    } else {
      self.undo.push(UndoGroup {
        reciprocals: vec![reciprocal],
      });
      debug!(groups = self.undo.len(), "undo group opened");
    }
    self.last_commit = Some(now);
  }

  /// Breaks coalescing so the next edit opens a fresh group. Called after
  /// navigation and any other non-edit action.
  pub fn commit_boundary(&mut self) {
    self.last_commit = None;
  }

  /// Replays the newest undo group. Returns false when there is nothing to
  /// undo.
  pub fn undo(&mut self, document: &mut TextDocument) -> bool {
    let Some(group) = self.undo.pop() else {
      return false;
    };
    let replayed = Self::replay(document, &group);
    self.redo.push(replayed);
    self.last_commit = None;
    debug!(remaining = self.undo.len(), "undo");
    true
  }

  /// Replays the newest redo group. Returns false when there is nothing to
  /// redo.
  pub fn redo(&mut self, document: &mut TextDocument) -> bool {
    let Some(group) = self.redo.pop() else {
      return false;
    };
    let replayed = Self::replay(document, &group);
    self.undo.push(replayed);
    self.last_commit = None;
    debug!(remaining = self.redo.len(), "redo");
    true
  }

  /// Applies a group's reciprocals newest-first and leaves one caret per
  /// replayed edit, each at its transaction's direction-chosen end.
  fn replay(document: &mut TextDocument, group: &UndoGroup) -> UndoGroup {
    let mut reciprocals = Vec::with_capacity(group.reciprocals.len());
    let mut landings: Vec<Index> = Vec::new();

    for transaction in group.reciprocals.iter().rev() {
      let forward = document.fulfill(transaction);
      let landing = match transaction.direction {
        Direction::Forward => forward.selection.tail,
        Direction::Backward => forward.selection.head,
      };

      // Earlier landings sit in front of this edit; keep them anchored.
      for prior in &mut landings {
        transaction.selection.pull(prior);
        forward.selection.push(prior);
      }

      landings.push(landing);
      reciprocals.push(forward);
    }

    let mut carets: Vec<Selection> = Vec::new();
    for landing in landings.iter().rev() {
      let caret = Selection::caret(*landing);
      if !carets.contains(&caret) {
        carets.push(caret);
      }
    }
    // Landings come from applied edits, so they are always in bounds.
    document.set_selections(carets).ok();

    UndoGroup { reciprocals }
  }
}
