use crate::moves::{Move, MoveKind};
use crate::rules::{rule, Rule};
use crate::{Board, CastleSide, ChessError, Color, Coords, Piece, PieceKind, KING_FILE};
use enum_iterator::all;

/// A private copy of a board for trying out moves.
///
/// Each probe applies a move to the grid only, tests the mover's king
/// and then restores exactly the squares it touched.
pub(crate) struct Probe {
  board: Board,
}

impl Probe {
  pub(crate) fn new(board: &Board) -> Self {
    Self {
      board: board.clone(),
    }
  }

  /// Whether the move leaves the mover's king safe
  pub(crate) fn is_safe(&mut self, r#move: &Move) -> bool {
    let board = &mut self.board;
    let origin = board.piece_at(r#move.from);
    let destination = board.piece_at(r#move.to);
    let capture = r#move
      .capture_square()
      .map(|square| (square, board.piece_at(square)));

    if let Some((square, _)) = capture {
      board.place(square, None);
    }
    let mut piece = r#move.piece;
    piece.moved = true;
    board.place(r#move.from, None);
    board.place(r#move.to, Some(piece));

    let safe = !board.in_check(piece.color);

    board.place(r#move.to, destination);
    if let Some((square, captured)) = capture {
      board.place(square, captured);
    }
    board.place(r#move.from, origin);
    safe
  }

  #[cfg(test)]
  pub(crate) fn board(&self) -> &Board {
    &self.board
  }
}

impl Board {
  /// Get whether a square is attacked by the specified side.
  ///
  /// Pawns attack the squares diagonally in front of them whether or not they are occupied.
  #[must_use]
  pub fn attacks(&self, target: Coords, side: Color) -> bool {
    all::<PieceKind>().any(|kind| match rule(kind) {
      Rule::Pawn => [-1, 1].into_iter().any(|file| {
        self
          .piece_at(target.offset((file, -side.forward())))
          .map_or(false, |piece| piece.is(PieceKind::Pawn, side))
      }),
      Rule::Offsets { slides, jumps } => {
        jumps.iter().any(|offset| {
          self
            .piece_at(target.offset(*offset))
            .map_or(false, |piece| piece.is(kind, side))
        }) || slides.iter().any(|direction| {
          self
            .ray(target, *direction)
            .map_or(false, |piece| piece.is(kind, side))
        })
      }
    })
  }

  // the first piece in a direction, None if the edge is reached first
  fn ray(&self, start: Coords, direction: (i8, i8)) -> Option<Piece> {
    let mut coords = start.offset(direction);
    while coords.is_valid() {
      if let Some(piece) = self.piece_at(coords) {
        return Some(piece);
      }
      coords = coords.offset(direction);
    }
    None
  }

  /// Whether the king of `side` is attacked
  #[must_use]
  pub fn in_check(&self, side: Color) -> bool {
    self.attacks(self.king(side), !side)
  }

  /// The pseudo-legal moves of a piece together with its special moves:
  /// every promotion option, en passant and castling.
  #[must_use]
  pub fn candidates(&self, piece: &Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    for r#move in self.pseudo_legal(piece) {
      if r#move.kind == MoveKind::Promotion {
        for kind in PieceKind::PROMOTIONS {
          moves.push(r#move.with_promotion(kind));
        }
      } else {
        moves.push(r#move);
      }
    }
    match piece.kind {
      PieceKind::Pawn => moves.extend(self.en_passant_move(piece)),
      PieceKind::King => moves.extend(self.castling_moves(piece)),
      _ => (),
    }
    moves
  }

  /// Generates the legal moves of a piece.
  /// `piece` must be a current snapshot from this board.
  #[must_use]
  pub fn legal(&self, piece: &Piece) -> Vec<Move> {
    self.legal_with(piece, &mut Probe::new(self))
  }

  fn legal_with(&self, piece: &Piece, probe: &mut Probe) -> Vec<Move> {
    self
      .candidates(piece)
      .into_iter()
      // castling checks the squares the king passes itself
      .filter(|r#move| r#move.kind == MoveKind::Castling || probe.is_safe(r#move))
      .collect()
  }

  /// Generates the legal moves of the piece on a square.
  /// An empty square has no moves.
  ///
  /// # Errors
  ///
  /// Will return `Err` if the coordinates are off the board
  pub fn legal_moves_from(&self, coords: Coords) -> Result<Vec<Move>, ChessError> {
    Ok(match self.get(coords)? {
      Some(piece) => self.legal(&piece),
      None => Vec::new(),
    })
  }

  /// Generates all legal moves for a side.
  #[must_use]
  pub fn all_legal(&self, side: Color) -> Vec<Move> {
    let mut probe = Probe::new(self);
    self
      .pieces(side)
      .iter()
      .flat_map(|piece| self.legal_with(piece, &mut probe))
      .collect()
  }

  /// Whether a side has any legal move
  #[must_use]
  pub fn has_legal(&self, side: Color) -> bool {
    let mut probe = Probe::new(self);
    self.pieces(side).iter().any(|piece| {
      self
        .candidates(piece)
        .iter()
        .any(|r#move| r#move.kind == MoveKind::Castling || probe.is_safe(r#move))
    })
  }

  /// The castling moves available to a king
  #[must_use]
  pub fn castling_moves(&self, king: &Piece) -> Vec<Move> {
    let side = king.color;
    let rank = side.home_rank();
    if king.kind != PieceKind::King
      || king.moved
      || king.coords != Coords::new(KING_FILE, rank)
      || self.in_check(side)
    {
      return Vec::new();
    }

    let mut moves = Vec::new();
    for castle in all::<CastleSide>() {
      if !self.castling.get(side, castle) {
        continue;
      }
      let rook_home = castle.rook_home(side);
      let rook_ready = self
        .piece_at(rook_home)
        .map_or(false, |rook| rook.is(PieceKind::Rook, side) && !rook.moved);
      if !rook_ready {
        continue;
      }

      let between = if castle.rook_file() < KING_FILE {
        castle.rook_file() + 1..KING_FILE
      } else {
        KING_FILE + 1..castle.rook_file()
      };
      let empty = between
        .into_iter()
        .all(|file| self.piece_at(Coords::new(file, rank)).is_none());

      let destination = Coords::new(castle.king_destination(), rank);
      let transit = if destination.file < KING_FILE {
        destination.file..=KING_FILE
      } else {
        KING_FILE..=destination.file
      };
      if empty
        && transit
          .into_iter()
          .all(|file| !self.attacks(Coords::new(file, rank), !side))
      {
        moves.push(Move::castling(
          *king,
          destination,
          rook_home,
          Coords::new(castle.rook_destination(), rank),
        ));
      }
    }
    moves
  }

  /// The en passant capture available to a pawn, if any
  #[must_use]
  pub fn en_passant_move(&self, pawn: &Piece) -> Option<Move> {
    let target = self.en_passant?;
    if pawn.kind != PieceKind::Pawn
      || target.rank != pawn.coords.rank + pawn.color.forward()
      || (target.file - pawn.coords.file).abs() != 1
    {
      return None;
    }
    let victim = self.piece_at(Coords::new(target.file, pawn.coords.rank))?;
    victim
      .is(PieceKind::Pawn, !pawn.color)
      .then(|| Move::en_passant(*pawn, target, victim))
  }
}
