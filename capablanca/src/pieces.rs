use crate::Coords;
use enum_iterator::Sequence;
use std::fmt;
use std::ops::Not;

/// One of the two sides
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Sequence)]
pub enum Color {
  /// Moves first, starts on ranks 1 and 2
  White,
  /// Starts on ranks 7 and 8
  Black,
}

impl Color {
  /// Index for array lookups
  #[must_use]
  #[inline(always)]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// The rank direction pawns of this side advance in
  #[must_use]
  pub const fn forward(self) -> i8 {
    match self {
      Self::White => 1,
      Self::Black => -1,
    }
  }

  /// The rank the king and rooks start on
  #[must_use]
  pub const fn home_rank(self) -> i8 {
    match self {
      Self::White => 0,
      Self::Black => 7,
    }
  }

  /// The rank unmoved pawns start on
  #[must_use]
  pub const fn pawn_rank(self) -> i8 {
    match self {
      Self::White => 1,
      Self::Black => 6,
    }
  }

  /// The rank pawns of this side promote on
  #[must_use]
  pub const fn promotion_rank(self) -> i8 {
    match self {
      Self::White => 7,
      Self::Black => 0,
    }
  }
}

impl Not for Color {
  type Output = Self;

  fn not(self) -> Self {
    match self {
      Self::White => Self::Black,
      Self::Black => Self::White,
    }
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::White => "White",
      Self::Black => "Black",
    })
  }
}

/// The kinds of piece in Capablanca chess
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Sequence)]
pub enum PieceKind {
  /// Advances forward, captures diagonally
  Pawn,
  /// Jumps (2, 1)
  Knight,
  /// Slides diagonally
  Bishop,
  /// Slides orthogonally
  Rook,
  /// Slides in all 8 directions
  Queen,
  /// Steps in all 8 directions
  King,
  /// Bishop and knight
  Archbishop,
  /// Rook and knight
  Chancellor,
}

impl PieceKind {
  /// The kinds a pawn may promote to, in the order they are generated
  pub const PROMOTIONS: [Self; 6] = [
    Self::Queen,
    Self::Rook,
    Self::Bishop,
    Self::Knight,
    Self::Archbishop,
    Self::Chancellor,
  ];

  /// Index for array lookups
  #[must_use]
  #[inline(always)]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// Whether a pawn may promote to this kind
  #[must_use]
  pub const fn is_promotable(self) -> bool {
    !matches!(self, Self::Pawn | Self::King)
  }

  /// The lowercase letter used for this kind in FEN and move notation
  #[must_use]
  pub const fn to_char(self) -> char {
    match self {
      Self::Pawn => 'p',
      Self::Knight => 'n',
      Self::Bishop => 'b',
      Self::Rook => 'r',
      Self::Queen => 'q',
      Self::King => 'k',
      Self::Archbishop => 'a',
      Self::Chancellor => 'c',
    }
  }

  /// Converts a letter of either case to a kind
  #[must_use]
  pub const fn from_char(c: char) -> Option<Self> {
    Some(match c.to_ascii_lowercase() {
      'p' => Self::Pawn,
      'n' => Self::Knight,
      'b' => Self::Bishop,
      'r' => Self::Rook,
      'q' => Self::Queen,
      'k' => Self::King,
      'a' => Self::Archbishop,
      'c' => Self::Chancellor,
      _ => return None,
    })
  }

  /// The name of the kind
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Pawn => "Pawn",
      Self::Knight => "Knight",
      Self::Bishop => "Bishop",
      Self::Rook => "Rook",
      Self::Queen => "Queen",
      Self::King => "King",
      Self::Archbishop => "Archbishop",
      Self::Chancellor => "Chancellor",
    }
  }
}

/// A piece on the board.
///
/// Pieces are small values owned by the square they stand on.
/// Copies handed out by the board are snapshots and go stale once the board changes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Piece {
  /// What kind of piece it is
  pub kind: PieceKind,
  /// Which side it belongs to
  pub color: Color,
  /// The square it stands on
  pub coords: Coords,
  /// Whether it has moved this game
  pub moved: bool,
}

impl Piece {
  /// Initialise an unmoved piece
  #[must_use]
  pub const fn new(kind: PieceKind, color: Color, coords: Coords) -> Self {
    Self {
      kind,
      color,
      coords,
      moved: false,
    }
  }

  /// Whether the piece is of the given kind and side
  #[must_use]
  pub fn is(&self, kind: PieceKind, color: Color) -> bool {
    self.kind == kind && self.color == color
  }

  /// The FEN letter for the piece, uppercase for white
  #[must_use]
  pub const fn to_char(&self) -> char {
    let c = self.kind.to_char();
    match self.color {
      Color::White => c.to_ascii_uppercase(),
      Color::Black => c,
    }
  }

  /// Converts a FEN letter to a piece standing on `coords`
  #[must_use]
  pub const fn from_char(c: char, coords: Coords) -> Option<Self> {
    let color = if c.is_ascii_uppercase() {
      Color::White
    } else {
      Color::Black
    };
    match PieceKind::from_char(c) {
      Some(kind) => Some(Self::new(kind, color, coords)),
      None => None,
    }
  }
}

impl fmt::Display for Piece {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} on {}", self.color, self.kind.name(), self.coords)
  }
}
