use crate::coords::{HEIGHT, WIDTH};
use crate::{Board, CastleSide, Color, Coords, Piece, PieceKind, KING_FILE};
use enum_iterator::all;
use std::fmt;
use std::str::FromStr;

/// An enum to represent the reasons for a FEN to be invalid.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FenError {
  /// An unrecognised piece was encountered
  #[error("invalid piece found: {0}")]
  InvalidPiece(char),
  /// The board is not 10 files by 8 ranks
  #[error("board must be 10x8")]
  Size,
  /// Required fields are missing
  #[error("required field (side to move) missing")]
  MissingFields,
  /// The side to move is not `w` or `b`
  #[error("invalid side to move: {0}")]
  InvalidSide(String),
  /// The castling field has letters other than `KQkq` or `-`
  #[error("invalid castling rights: {0}")]
  InvalidCastling(String),
  /// The en passant field is not an empty square behind a pawn that just advanced two ranks, or `-`
  #[error("invalid en passant square: {0}")]
  InvalidSquare(String),
  /// A side has no king or several
  #[error("each side must have exactly one king")]
  KingCount,
  /// A move counter is not a number
  #[error("invalid move counter: {0}")]
  InvalidNumber(String),
}

impl FromStr for Board {
  type Err = FenError;

  fn from_str(fen: &str) -> Result<Self, Self::Err> {
    Self::new(fen)
  }
}

impl Board {
  /// Initialise a new `Board` from a FEN
  ///
  /// # Errors
  /// Return a `FenError` if one of the invalid input types mentioned applies.
  ///
  /// # Examples
  /// Getting the start position:
  /// ```
  /// capablanca::Board::new("rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1").unwrap();
  /// ```
  pub fn new(fen: &str) -> Result<Self, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 2 {
      return Err(FenError::MissingFields);
    }

    let mut board = Self::empty();
    process_board(&mut board, fields[0])?;

    board.to_move = match fields[1] {
      "w" => Color::White,
      "b" => Color::Black,
      side => return Err(FenError::InvalidSide(side.to_owned())),
    };

    if let Some(&castling) = fields.get(2) {
      if castling != "-" {
        for c in castling.chars() {
          match c {
            'K' => board.castling.grant(Color::White, CastleSide::King),
            'Q' => board.castling.grant(Color::White, CastleSide::Queen),
            'k' => board.castling.grant(Color::Black, CastleSide::King),
            'q' => board.castling.grant(Color::Black, CastleSide::Queen),
            _ => return Err(FenError::InvalidCastling(castling.to_owned())),
          }
        }
      }
    }

    if let Some(&square) = fields.get(3) {
      if square != "-" {
        let invalid = || FenError::InvalidSquare(square.to_owned());
        let target = square.parse::<Coords>().map_err(|_| invalid())?;
        // the square the opponent's pawn skipped over
        let mover = !board.to_move;
        if target.rank != mover.pawn_rank() + mover.forward() || board.piece_at(target).is_some() {
          return Err(invalid());
        }
        board.en_passant = Some(target);
      }
    }

    if let Some(&halfmoves) = fields.get(4) {
      board.halfmoves = halfmoves
        .parse()
        .map_err(|_| FenError::InvalidNumber(halfmoves.to_owned()))?;
    }

    if let Some(&moves) = fields.get(5) {
      board.moves = match moves.parse() {
        Ok(0) | Err(_) => return Err(FenError::InvalidNumber(moves.to_owned())),
        Ok(number) => number,
      };
    }

    board.infer_moved();
    board.hash = board.get_hash();

    Ok(board)
  }

  // A FEN doesn't record which pieces have moved.
  // Pawns off their starting rank have, kings and rooks have unless a castling right says otherwise.
  fn infer_moved(&mut self) {
    for coords in Coords::all() {
      let Some(mut piece) = self.piece_at(coords) else {
        continue;
      };
      piece.moved = match piece.kind {
        PieceKind::Pawn => coords.rank != piece.color.pawn_rank(),
        PieceKind::King => {
          coords != Coords::new(KING_FILE, piece.color.home_rank()) || !self.castling.any(piece.color)
        }
        PieceKind::Rook => !all::<CastleSide>().any(|side| {
          side.rook_home(piece.color) == coords && self.castling.get(piece.color, side)
        }),
        _ => false,
      };
      self.place(coords, Some(piece));
    }
  }
}

fn process_board(board: &mut Board, layout: &str) -> Result<(), FenError> {
  let rows: Vec<&str> = layout.split('/').collect();
  if rows.len() != HEIGHT {
    return Err(FenError::Size);
  }

  let mut kings = [0; 2];
  // FEN lists the last rank first
  for (row, string) in rows.iter().enumerate() {
    let rank = (HEIGHT - row - 1) as i8;
    let mut file: usize = 0;
    let mut squares: usize = 0;
    for c in string.chars() {
      if let Some(digit) = c.to_digit(10) {
        squares = squares
          .checked_mul(10)
          .and_then(|squares| squares.checked_add(digit as usize))
          .ok_or(FenError::Size)?;
      } else {
        file = file.saturating_add(squares);
        squares = 0;
        if file >= WIDTH {
          return Err(FenError::Size);
        }
        let coords = Coords::new(file as i8, rank);
        let piece = Piece::from_char(c, coords).ok_or(FenError::InvalidPiece(c))?;
        if piece.kind == PieceKind::King {
          kings[piece.color.index()] += 1;
        }
        board.place(coords, Some(piece));
        file += 1;
      }
    }
    if file.saturating_add(squares) != WIDTH {
      return Err(FenError::Size);
    }
  }

  if kings != [1, 1] {
    return Err(FenError::KingCount);
  }
  Ok(())
}

impl fmt::Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // save board layout
    let mut rows = Vec::with_capacity(HEIGHT);
    for rank in (0..HEIGHT as i8).rev() {
      let mut squares = 0;
      let mut output = String::new();
      for file in 0..WIDTH as i8 {
        match self.piece_at(Coords::new(file, rank)) {
          Some(piece) => {
            if squares > 0 {
              output.push_str(&squares.to_string());
              squares = 0;
            }
            output.push(piece.to_char());
          }
          None => squares += 1,
        }
      }
      if squares > 0 {
        output.push_str(&squares.to_string());
      }
      rows.push(output);
    }

    let mut result = rows.join("/");

    // save side to move
    result.push_str(match self.to_move {
      Color::White => " w ",
      Color::Black => " b ",
    });

    // save castling rights
    if self.castling.is_empty() {
      result.push('-');
    } else {
      for (color, side, c) in [
        (Color::White, CastleSide::King, 'K'),
        (Color::White, CastleSide::Queen, 'Q'),
        (Color::Black, CastleSide::King, 'k'),
        (Color::Black, CastleSide::Queen, 'q'),
      ] {
        if self.castling.get(color, side) {
          result.push(c);
        }
      }
    }

    // save en passant
    result.push(' ');
    match self.en_passant {
      Some(coords) => result.push_str(&coords.to_string()),
      None => result.push('-'),
    }

    // save halfmove clock and full move count
    write!(f, "{result} {} {}", self.halfmoves, self.moves)
  }
}
