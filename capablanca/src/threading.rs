use crate::{Board, ChessError, Coords, Game, Gamestate, Move, MoveOutcome};
use parking_lot::Mutex;
use std::sync::Arc;

/// A `Game` shared between threads.
///
/// Every operation holds the lock for its whole duration,
/// so no thread can observe a half-applied move.
#[derive(Clone, Default)]
pub struct SharedGame {
  game: Arc<Mutex<Game>>,
}

impl SharedGame {
  /// Share a game
  #[must_use]
  pub fn new(game: Game) -> Self {
    Self {
      game: Arc::new(Mutex::new(game)),
    }
  }

  /// Run a closure with read access to the game
  pub fn with<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
    f(&self.game.lock())
  }

  /// Run a closure with exclusive access to the game
  pub fn with_mut<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
    f(&mut self.game.lock())
  }

  /// A copy of the current position
  #[must_use]
  pub fn snapshot(&self) -> Board {
    self.with(|game| game.board().clone())
  }

  /// The current state of the game
  #[must_use]
  pub fn state(&self) -> Gamestate {
    self.with(Game::state)
  }

  /// The legal moves of the piece on a square
  ///
  /// # Errors
  ///
  /// Will return `Err` if the coordinates are off the board
  pub fn legal_moves_from(&self, coords: Coords) -> Result<Vec<Move>, ChessError> {
    self.with(|game| game.legal_moves_from(coords))
  }

  /// Play a move if it is legal
  ///
  /// # Errors
  ///
  /// Will return `Err` if the game is over or the move is not legal
  pub fn play(&self, r#move: &Move) -> Result<MoveOutcome, ChessError> {
    self.with_mut(|game| game.play(r#move))
  }

  /// Play a move written in long algebraic notation
  ///
  /// # Errors
  ///
  /// Will return `Err` if the text does not name a legal move
  pub fn play_notation(&self, text: &str) -> Result<MoveOutcome, ChessError> {
    self.with_mut(|game| game.play_notation(text))
  }
}
