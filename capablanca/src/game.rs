use crate::keys::Hash;
use crate::moves::parse_move;
use crate::{Board, ChessError, Color, Coords, FenError, Move, MoveHistory, MoveOutcome};
use tracing::info;

/// represents the status of the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gamestate {
  /// The side to move has legal moves and no draw applies
  InProgress,
  /// The given side has delivered checkmate
  Checkmate(Color),
  /// The side to move has no legal moves and is not in check
  Stalemate,
  /// The same position has occurred three times
  Repetition,
  /// 100 plies without a pawn move or capture
  Move50,
}

/// A game of Capablanca chess: the board, the moves played and the result
#[derive(Clone, Debug)]
pub struct Game {
  start: Board,
  board: Board,
  history: MoveHistory,
  // hashes since the last irreversible move
  positions: Vec<Hash>,
  state: Gamestate,
}

impl Default for Game {
  fn default() -> Self {
    Self::new()
  }
}

impl Game {
  /// A new game from the starting position
  #[must_use]
  pub fn new() -> Self {
    Self::from_board(crate::positions::get_startpos())
  }

  /// A new game from a FEN
  ///
  /// # Errors
  ///
  /// Will return `Err` if the FEN is invalid
  pub fn from_fen(fen: &str) -> Result<Self, FenError> {
    Ok(Self::from_board(Board::new(fen)?))
  }

  /// A new game from a position
  #[must_use]
  pub fn from_board(board: Board) -> Self {
    let mut game = Self {
      start: board.clone(),
      positions: vec![board.hash()],
      board,
      history: MoveHistory::new(),
      state: Gamestate::InProgress,
    };
    game.state = game.classify();
    game
  }

  /// Start again from the position this game started from, clearing the history
  pub fn new_game(&mut self) {
    *self = Self::from_board(self.start.clone());
  }

  /// The current position
  #[must_use]
  pub fn board(&self) -> &Board {
    &self.board
  }

  /// The moves played so far
  #[must_use]
  pub fn history(&self) -> &MoveHistory {
    &self.history
  }

  /// The current state of the game
  #[must_use]
  pub fn state(&self) -> Gamestate {
    self.state
  }

  /// The legal moves for the side to move
  #[must_use]
  pub fn legal_moves(&self) -> Vec<Move> {
    if self.state == Gamestate::InProgress {
      self.board.all_legal(self.board.to_move())
    } else {
      Vec::new()
    }
  }

  /// The legal moves of the piece on a square, empty if it isn't that side's turn
  ///
  /// # Errors
  ///
  /// Will return `Err` if the coordinates are off the board
  pub fn legal_moves_from(&self, coords: Coords) -> Result<Vec<Move>, ChessError> {
    let moves = self.board.legal_moves_from(coords)?;
    let movable = self.state == Gamestate::InProgress
      && self
        .board
        .get(coords)?
        .map_or(false, |piece| piece.color == self.board.to_move());
    Ok(if movable { moves } else { Vec::new() })
  }

  /// Play a move if it is legal in the current position
  ///
  /// # Errors
  ///
  /// Will return `Err` if the game is over or the move is not legal
  pub fn play(&mut self, r#move: &Move) -> Result<MoveOutcome, ChessError> {
    if self.state != Gamestate::InProgress {
      return Err(ChessError::GameOver);
    }
    if !self.legal_moves().contains(r#move) {
      return Err(ChessError::IllegalMove(r#move.to_string()));
    }

    let side = self.board.to_move();
    let fullmove = self.board.fullmoves();
    let outcome = self.board.execute(r#move)?;

    if self.board.halfmoves() == 0 {
      self.positions.clear();
    }
    self.positions.push(self.board.hash());
    self.state = self.classify();

    let mate = matches!(self.state, Gamestate::Checkmate(_));
    self.history.record(outcome, side, fullmove, mate);
    if self.state != Gamestate::InProgress {
      info!(state = ?self.state, moves = %self.history, "game over");
    }
    Ok(outcome)
  }

  /// Play a move written in long algebraic notation, e.g. `e2e4` or `b7b8c`
  ///
  /// # Errors
  ///
  /// Will return `Err` if the game is over, or the text cannot be parsed or does not name a legal move
  pub fn play_notation(&mut self, text: &str) -> Result<MoveOutcome, ChessError> {
    if self.state != Gamestate::InProgress {
      return Err(ChessError::GameOver);
    }
    let (from, to, promotion) = parse_move(text)?;
    let r#move = self
      .legal_moves()
      .into_iter()
      .find(|r#move| r#move.from() == from && r#move.to() == to && r#move.promotion() == promotion)
      .ok_or_else(|| ChessError::IllegalMove(text.to_owned()))?;
    self.play(&r#move)
  }

  // mate and stalemate take precedence over the fifty move rule, which takes precedence over repetition
  fn classify(&self) -> Gamestate {
    let side = self.board.to_move();
    if !self.board.has_legal(side) {
      if self.board.in_check(side) {
        Gamestate::Checkmate(!side)
      } else {
        Gamestate::Stalemate
      }
    } else if self.board.fifty_move_draw() {
      Gamestate::Move50
    } else if self
      .positions
      .iter()
      .filter(|hash| **hash == self.board.hash())
      .count()
      >= 3
    {
      Gamestate::Repetition
    } else {
      Gamestate::InProgress
    }
  }
}
