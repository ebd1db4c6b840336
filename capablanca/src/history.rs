use crate::{Color, MoveOutcome};
use std::fmt;

/// A move that has been played, with the notation shown for it
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
  /// The result of executing the move
  pub outcome: MoveOutcome,
  /// The side that played the move
  pub side: Color,
  /// The full move number the move was played on
  pub fullmove: u16,
  /// Long algebraic notation, with `+` for check and `#` for checkmate
  pub notation: String,
}

/// The moves of a game in the order they were played.
/// Entries are only ever appended, until a new game clears the record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MoveHistory {
  entries: Vec<HistoryEntry>,
}

impl MoveHistory {
  /// An empty history
  #[must_use]
  pub const fn new() -> Self {
    Self {
      entries: Vec::new(),
    }
  }

  /// Append an executed move
  pub fn record(&mut self, outcome: MoveOutcome, side: Color, fullmove: u16, mate: bool) {
    let mut notation = outcome.played.to_string();
    if mate {
      notation.push('#');
    } else if outcome.check {
      notation.push('+');
    }
    self.entries.push(HistoryEntry {
      outcome,
      side,
      fullmove,
      notation,
    });
  }

  /// The moves played so far
  #[must_use]
  pub fn entries(&self) -> &[HistoryEntry] {
    &self.entries
  }

  /// The most recent move
  #[must_use]
  pub fn last(&self) -> Option<&HistoryEntry> {
    self.entries.last()
  }

  /// The number of plies recorded
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether no moves have been recorded
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Forget every move, for a new game
  pub fn clear(&mut self) {
    self.entries.clear();
  }
}

// numbered move list, e.g. `1. e2e4 e7e5 2. f1i1`
impl fmt::Display for MoveHistory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for entry in &self.entries {
      if !first {
        f.write_str(" ")?;
      }
      match entry.side {
        Color::White => write!(f, "{}. {}", entry.fullmove, entry.notation)?,
        Color::Black if first => write!(f, "{}... {}", entry.fullmove, entry.notation)?,
        Color::Black => f.write_str(&entry.notation)?,
      }
      first = false;
    }
    Ok(())
  }
}
