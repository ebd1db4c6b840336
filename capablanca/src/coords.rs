use crate::ChessError;
use std::fmt;
use std::str::FromStr;

/// The number of files on the board
pub const WIDTH: usize = 10;
/// The number of ranks on the board
pub const HEIGHT: usize = 8;

/// A square on the board.
///
/// Coordinates off the board can be represented so offsets can be probed,
/// but only valid coordinates address a square.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Coords {
  /// The file, 0 is the a-file
  pub file: i8,
  /// The rank, 0 is the first rank
  pub rank: i8,
}

impl Coords {
  /// Initialise a coordinate from a file and rank
  #[must_use]
  pub const fn new(file: i8, rank: i8) -> Self {
    Self { file, rank }
  }

  /// Whether the coordinate addresses a square on the board
  #[must_use]
  pub const fn is_valid(self) -> bool {
    self.file >= 0 && self.file < WIDTH as i8 && self.rank >= 0 && self.rank < HEIGHT as i8
  }

  /// The coordinate shifted by a (file, rank) offset
  #[must_use]
  pub const fn offset(self, (file, rank): (i8, i8)) -> Self {
    Self {
      file: self.file.wrapping_add(file),
      rank: self.rank.wrapping_add(rank),
    }
  }

  /// Returns the coordinate unchanged if it is on the board.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the coordinate is off the board
  pub fn checked(self) -> Result<Self, ChessError> {
    if self.is_valid() {
      Ok(self)
    } else {
      Err(ChessError::InvalidCoordinate(format!("({}, {})", self.file, self.rank)))
    }
  }

  /// Convert the coordinate to algebraic notation, e.g. `j8`
  ///
  /// # Errors
  ///
  /// Will return `Err` if the coordinate is off the board
  pub fn to_algebraic(self) -> Result<String, ChessError> {
    let coords = self.checked()?;
    Ok(format!(
      "{}{}",
      (b'a' + coords.file as u8) as char,
      coords.rank + 1
    ))
  }

  /// All squares of the board, rank by rank from the first rank, a-file first
  pub fn all() -> impl Iterator<Item = Self> {
    (0..HEIGHT as i8).flat_map(|rank| (0..WIDTH as i8).map(move |file| Self::new(file, rank)))
  }

  // (row, column) for indexing the grid, assumes the coordinate is valid
  #[inline(always)]
  pub(crate) const fn index(self) -> (usize, usize) {
    (self.rank as usize, self.file as usize)
  }
}

impl fmt::Display for Coords {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.to_algebraic() {
      Ok(algebraic) => f.write_str(&algebraic),
      Err(_) => write!(f, "({}, {})", self.file, self.rank),
    }
  }
}

impl FromStr for Coords {
  type Err = ChessError;

  fn from_str(algebraic: &str) -> Result<Self, Self::Err> {
    let invalid = || ChessError::InvalidCoordinate(algebraic.to_owned());
    let mut chars = algebraic.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
      return Err(invalid());
    };
    if !file.is_ascii_lowercase() || !rank.is_ascii_digit() || rank == '0' {
      return Err(invalid());
    }
    Self::new((file as u8 - b'a') as i8, (rank as u8 - b'1') as i8)
      .checked()
      .map_err(|_| invalid())
  }
}
