#![forbid(unsafe_code)]
#![warn(missing_docs, unused)]
//! The backend for Capablanca chess, played on a 10x8 board with archbishops and chancellors

use crate::keys::{keys, Hash};
use array2d::Array2D;
use enum_iterator::{all, Sequence};

pub use crate::coords::{Coords, HEIGHT, WIDTH};
pub use crate::execute::MoveOutcome;
pub use crate::game::{Game, Gamestate};
pub use crate::history::{HistoryEntry, MoveHistory};
pub use crate::moves::{Move, MoveKind};
pub use crate::parsing::FenError;
pub use crate::pieces::{Color, Piece, PieceKind};
pub use crate::threading::SharedGame;

/// Coordinates and algebraic notation
pub mod coords;
/// Applying moves to the board
pub mod execute;
/// Game flow and termination
pub mod game;
/// The record of moves played
pub mod history;
/// Legal move generation and check detection
pub mod movegen;
/// The move descriptor
pub mod moves;
/// FEN parsing and serialisation
pub mod parsing;
/// Perft node counting
pub mod perft;
/// Piece kinds and sides
pub mod pieces;
/// Starting positions
pub mod positions;
/// Sharing a game between threads
pub mod threading;

mod keys;
mod rules;

#[cfg(test)]
mod tests;

/// The file the king starts on
pub const KING_FILE: i8 = 5;

/// Errors returned by board and game operations
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ChessError {
  /// A coordinate was off the board or could not be parsed
  #[error("invalid coordinate: {0}")]
  InvalidCoordinate(String),
  /// A square expected to hold a piece was empty
  #[error("no piece on {0}")]
  EmptySquare(Coords),
  /// A move was malformed and cannot be applied
  #[error("malformed move {played}: {reason}")]
  StructuralViolation {
    /// The move in long algebraic notation
    played: String,
    /// What is wrong with it
    reason: &'static str,
  },
  /// A move is not among the legal moves of the position
  #[error("move {0} is not legal in this position")]
  IllegalMove(String),
  /// Move text could not be parsed
  #[error("invalid move notation: {0}")]
  InvalidNotation(String),
  /// The game has already finished
  #[error("the game is already over")]
  GameOver,
}

/// The side of the board a king castles towards
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Sequence)]
pub enum CastleSide {
  /// Towards the j-file
  King,
  /// Towards the a-file
  Queen,
}

impl CastleSide {
  /// Index for array lookups
  #[must_use]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// The file the rook starts on
  #[must_use]
  pub const fn rook_file(self) -> i8 {
    match self {
      Self::King => WIDTH as i8 - 1,
      Self::Queen => 0,
    }
  }

  /// The file the king ends up on
  #[must_use]
  pub const fn king_destination(self) -> i8 {
    match self {
      Self::King => 8,
      Self::Queen => 2,
    }
  }

  /// The file the rook ends up on
  #[must_use]
  pub const fn rook_destination(self) -> i8 {
    match self {
      Self::King => 7,
      Self::Queen => 3,
    }
  }

  /// The square the rook starts on for the given side
  #[must_use]
  pub const fn rook_home(self, color: Color) -> Coords {
    Coords::new(self.rook_file(), color.home_rank())
  }
}

/// The four castling rights, in the order KQkq
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CastlingRights([bool; 4]);

impl CastlingRights {
  /// Every right granted
  #[must_use]
  pub const fn all() -> Self {
    Self([true; 4])
  }

  /// No rights granted
  #[must_use]
  pub const fn none() -> Self {
    Self([false; 4])
  }

  /// Whether `color` may still castle towards `side`
  #[must_use]
  pub const fn get(&self, color: Color, side: CastleSide) -> bool {
    self.0[color.index() * 2 + side.index()]
  }

  /// Grant a right. Only used while setting up a position.
  pub(crate) fn grant(&mut self, color: Color, side: CastleSide) {
    self.0[color.index() * 2 + side.index()] = true;
  }

  // returns whether the right was held
  fn revoke(&mut self, color: Color, side: CastleSide) -> bool {
    let index = color.index() * 2 + side.index();
    let held = self.0[index];
    self.0[index] = false;
    held
  }

  /// Whether either right of `color` is still held
  #[must_use]
  pub const fn any(&self, color: Color) -> bool {
    self.0[color.index() * 2] || self.0[color.index() * 2 + 1]
  }

  /// Whether no rights are held
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    !(self.0[0] || self.0[1] || self.0[2] || self.0[3])
  }

  /// The rights held in `self` but not in `other`
  #[must_use]
  pub const fn difference(&self, other: &Self) -> Self {
    Self([
      self.0[0] && !other.0[0],
      self.0[1] && !other.0[1],
      self.0[2] && !other.0[2],
      self.0[3] && !other.0[3],
    ])
  }
}

/// Represents a Capablanca chess position
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
  pieces: Array2D<Option<Piece>>,
  to_move: Color,
  castling: CastlingRights,
  en_passant: Option<Coords>,
  halfmoves: u16,
  moves: u16,
  kings: [Coords; 2],
  hash: Hash,
}

impl Board {
  // an empty board with white to move, pieces are added with `place`
  pub(crate) fn empty() -> Self {
    Self {
      pieces: Array2D::filled_with(None, HEIGHT, WIDTH),
      to_move: Color::White,
      castling: CastlingRights::none(),
      en_passant: None,
      halfmoves: 0,
      moves: 1,
      kings: [Coords::new(0, 0); 2],
      hash: 0,
    }
  }

  /// Returns the piece at the given coordinates.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the coordinates are off the board
  pub fn get(&self, coords: Coords) -> Result<Option<Piece>, ChessError> {
    Ok(self.piece_at(coords.checked()?))
  }

  // off-board coordinates are treated as empty
  #[inline(always)]
  pub(crate) fn piece_at(&self, coords: Coords) -> Option<Piece> {
    self
      .pieces
      .get(coords.rank as usize, coords.file as usize)
      .copied()
      .flatten()
  }

  /// The only write path to the grid.
  /// Keeps the piece's coordinates, the king cache and the hash in step with the squares.
  pub(crate) fn place(&mut self, coords: Coords, piece: Option<Piece>) {
    let keys = keys();
    if let Some(old) = self.pieces[coords.index()] {
      self.hash ^= keys.piece(&old);
    }
    let piece = piece.map(|mut piece| {
      piece.coords = coords;
      self.hash ^= keys.piece(&piece);
      if piece.kind == PieceKind::King {
        self.kings[piece.color.index()] = coords;
      }
      piece
    });
    self.pieces[coords.index()] = piece;
  }

  /// All pieces of one side, rank by rank from the first rank
  #[must_use]
  pub fn pieces(&self, side: Color) -> Vec<Piece> {
    Coords::all()
      .filter_map(|coords| self.piece_at(coords))
      .filter(|piece| piece.color == side)
      .collect()
  }

  /// The square the king of `side` stands on
  #[must_use]
  pub fn king(&self, side: Color) -> Coords {
    self.kings[side.index()]
  }

  /// The side currently to move
  #[must_use]
  pub fn to_move(&self) -> Color {
    self.to_move
  }

  /// The castling rights still held
  #[must_use]
  pub fn castling(&self) -> CastlingRights {
    self.castling
  }

  /// The square a pawn skipped over on the previous ply, if any
  #[must_use]
  pub fn en_passant(&self) -> Option<Coords> {
    self.en_passant
  }

  /// Plies since the last pawn move or capture
  #[must_use]
  pub fn halfmoves(&self) -> u16 {
    self.halfmoves
  }

  /// The full move number, starting at 1 and incremented after Black moves
  #[must_use]
  pub fn fullmoves(&self) -> u16 {
    self.moves
  }

  /// The number of plies played since the start of the game
  #[must_use]
  pub fn ply(&self) -> u32 {
    u32::from(self.moves).saturating_sub(1) * 2 + u32::from(self.to_move == Color::Black)
  }

  /// The Zobrist hash of the position
  #[must_use]
  pub fn hash(&self) -> Hash {
    self.hash
  }

  /// Whether the fifty move rule allows a draw
  #[must_use]
  pub fn fifty_move_draw(&self) -> bool {
    self.halfmoves >= 100
  }

  /// Computes the hash of the position from scratch
  #[must_use]
  pub(crate) fn get_hash(&self) -> Hash {
    let keys = keys();
    let mut result = 0;

    if self.to_move == Color::Black {
      result ^= keys.to_move();
    }

    for color in all::<Color>() {
      for side in all::<CastleSide>() {
        if self.castling.get(color, side) {
          result ^= keys.castling(color, side);
        }
      }
    }

    if let Some(coords) = self.en_passant {
      result ^= keys.en_passant(coords);
    }

    for coords in Coords::all() {
      if let Some(piece) = self.piece_at(coords) {
        result ^= keys.piece(&piece);
      }
    }

    result
  }

  /// Locates the king of `side` by scanning the grid
  #[must_use]
  pub(crate) fn find_king(&self, side: Color) -> Option<Coords> {
    Coords::all().find(|coords| {
      self
        .piece_at(*coords)
        .map_or(false, |piece| piece.is(PieceKind::King, side))
    })
  }

  /// Checks the cached values against the grid.
  /// Returns a description of the first mismatch found.
  #[must_use]
  pub fn validate(&self) -> Option<&'static str> {
    for color in all::<Color>() {
      if self.find_king(color) != Some(self.king(color)) {
        return Some("king cache does not match the grid");
      }
    }
    for coords in Coords::all() {
      if let Some(piece) = self.piece_at(coords) {
        if piece.coords != coords {
          return Some("piece coordinates do not match its square");
        }
      }
    }
    if self.get_hash() != self.hash {
      return Some("hash does not match the position");
    }
    None
  }
}
