use crate::{ChessError, Coords, Piece, PieceKind};
use std::fmt;

/// What sort of move a [`Move`] is
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MoveKind {
  /// A move to an empty square
  Normal,
  /// A move capturing the piece on the destination
  Capture,
  /// The king and a rook moving together
  Castling,
  /// A pawn capturing a pawn that has just advanced two ranks past it
  EnPassant,
  /// A pawn reaching the last rank, possibly with a capture
  Promotion,
}

/// A move, fully described relative to the board it was generated on
#[derive(Clone, Copy, Debug)]
pub struct Move {
  pub(crate) from: Coords,
  pub(crate) to: Coords,
  pub(crate) piece: Piece,
  pub(crate) captured: Option<Piece>,
  pub(crate) kind: MoveKind,
  pub(crate) promotion: Option<PieceKind>,
  pub(crate) rook: Option<(Coords, Coords)>,
}

impl Move {
  /// A plain move or capture of `piece` to `to`
  #[must_use]
  pub const fn new(piece: Piece, to: Coords, captured: Option<Piece>) -> Self {
    Self {
      from: piece.coords,
      to,
      piece,
      captured,
      kind: if captured.is_some() {
        MoveKind::Capture
      } else {
        MoveKind::Normal
      },
      promotion: None,
      rook: None,
    }
  }

  /// A pawn capturing en passant, `captured` stands beside the pawn rather than on `to`
  #[must_use]
  pub const fn en_passant(pawn: Piece, to: Coords, captured: Piece) -> Self {
    Self {
      from: pawn.coords,
      to,
      piece: pawn,
      captured: Some(captured),
      kind: MoveKind::EnPassant,
      promotion: None,
      rook: None,
    }
  }

  /// The king castling to `to` while the rook moves from `rook_from` to `rook_to`
  #[must_use]
  pub const fn castling(king: Piece, to: Coords, rook_from: Coords, rook_to: Coords) -> Self {
    Self {
      from: king.coords,
      to,
      piece: king,
      captured: None,
      kind: MoveKind::Castling,
      promotion: None,
      rook: Some((rook_from, rook_to)),
    }
  }

  /// The same move, promoting to `kind`
  #[must_use]
  pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
    self.kind = MoveKind::Promotion;
    self.promotion = Some(kind);
    self
  }

  /// The square the piece moves from
  #[must_use]
  pub const fn from(&self) -> Coords {
    self.from
  }

  /// The square the piece moves to
  #[must_use]
  pub const fn to(&self) -> Coords {
    self.to
  }

  /// The piece moving, as it was before the move
  #[must_use]
  pub const fn piece(&self) -> Piece {
    self.piece
  }

  /// The piece captured, if any
  #[must_use]
  pub const fn captured(&self) -> Option<Piece> {
    self.captured
  }

  /// The square the captured piece is removed from.
  /// Differs from the destination for en passant.
  #[must_use]
  pub fn capture_square(&self) -> Option<Coords> {
    self.captured.map(|piece| piece.coords)
  }

  /// What sort of move this is
  #[must_use]
  pub const fn kind(&self) -> MoveKind {
    self.kind
  }

  /// The kind the pawn promotes to, if any
  #[must_use]
  pub const fn promotion(&self) -> Option<PieceKind> {
    self.promotion
  }

  /// The rook's origin and destination when castling
  #[must_use]
  pub const fn rook(&self) -> Option<(Coords, Coords)> {
    self.rook
  }

  /// Whether the move captures a piece
  #[must_use]
  pub const fn is_capture(&self) -> bool {
    self.captured.is_some()
  }

  fn captured_identity(&self) -> Option<(PieceKind, crate::Color, Coords)> {
    self
      .captured
      .map(|piece| (piece.kind, piece.color, piece.coords))
  }
}

// Captures of different pieces are different moves, even onto the same square.
// The moving piece's history is not part of the identity.
impl PartialEq for Move {
  fn eq(&self, other: &Self) -> bool {
    self.from == other.from
      && self.to == other.to
      && self.kind == other.kind
      && self.promotion == other.promotion
      && self.captured_identity() == other.captured_identity()
  }
}

impl Eq for Move {}

// Long algebraic notation
impl fmt::Display for Move {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.from, self.to)?;
    if let Some(kind) = self.promotion {
      write!(f, "{}", kind.to_char())?;
    }
    Ok(())
  }
}

/// Parse long algebraic notation such as `e2e4` or `b7b8a`
/// into its origin, destination and promotion.
///
/// # Errors
///
/// Will return `Err` if the text is not a move on this board
pub fn parse_move(text: &str) -> Result<(Coords, Coords, Option<PieceKind>), ChessError> {
  let invalid = || ChessError::InvalidNotation(text.to_owned());
  if !text.is_ascii() || !(4..=5).contains(&text.len()) {
    return Err(invalid());
  }
  let from = text[0..2].parse::<Coords>().map_err(|_| invalid())?;
  let to = text[2..4].parse::<Coords>().map_err(|_| invalid())?;
  let promotion = match text[4..].chars().next() {
    Some(c) => match PieceKind::from_char(c) {
      Some(kind) if kind.is_promotable() => Some(kind),
      _ => return Err(invalid()),
    },
    None => None,
  };
  Ok((from, to, promotion))
}
