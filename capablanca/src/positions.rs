use crate::Board;

/// The starting position of Capablanca chess
pub const STARTPOS: &str = "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1";

/// The starting position
#[must_use]
// Should never panic
#[allow(clippy::missing_panics_doc)]
pub fn get_startpos() -> Board {
  Board::new(STARTPOS).expect("the starting position is a valid FEN")
}
