//! Movement rules for each kind of piece.
//!
//! Every kind is described by one entry of [`rule`], which is also used
//! in reverse for attack detection.

use crate::moves::Move;
use crate::{Board, Coords, Piece, PieceKind};

// offsets are (file, rank)
const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ROYAL: [(i8, i8); 8] = [
  (0, 1),
  (0, -1),
  (1, 0),
  (-1, 0),
  (1, 1),
  (-1, 1),
  (1, -1),
  (-1, -1),
];
const KNIGHT: [(i8, i8); 8] = [
  (1, 2),
  (-1, 2),
  (1, -2),
  (-1, -2),
  (2, 1),
  (-2, 1),
  (2, -1),
  (-2, -1),
];

/// How a kind of piece moves
pub(crate) enum Rule {
  /// Pawns move differently to how they capture
  Pawn,
  /// Slides along each direction, then jumps to each offset.
  /// Both sets are symmetric, so they also describe where attacks come from.
  Offsets {
    slides: &'static [(i8, i8)],
    jumps: &'static [(i8, i8)],
  },
}

/// The movement rule for every kind of piece
pub(crate) const fn rule(kind: PieceKind) -> Rule {
  match kind {
    PieceKind::Pawn => Rule::Pawn,
    PieceKind::Knight => Rule::Offsets {
      slides: &[],
      jumps: &KNIGHT,
    },
    PieceKind::Bishop => Rule::Offsets {
      slides: &DIAGONAL,
      jumps: &[],
    },
    PieceKind::Rook => Rule::Offsets {
      slides: &ORTHOGONAL,
      jumps: &[],
    },
    PieceKind::Queen => Rule::Offsets {
      slides: &ROYAL,
      jumps: &[],
    },
    PieceKind::King => Rule::Offsets {
      slides: &[],
      jumps: &ROYAL,
    },
    PieceKind::Archbishop => Rule::Offsets {
      slides: &DIAGONAL,
      jumps: &KNIGHT,
    },
    PieceKind::Chancellor => Rule::Offsets {
      slides: &ORTHOGONAL,
      jumps: &KNIGHT,
    },
  }
}

impl Board {
  /// Generates the pseudo-legal moves of a piece.
  /// Pseudo-legal moves may expose the king to attack but are otherwise legal.
  ///
  /// Never includes castling or en passant.
  /// A pawn reaching the last rank is tagged with a queen promotion only,
  /// see [`Board::candidates`] for the full set of promotions.
  #[must_use]
  pub fn pseudo_legal(&self, piece: &Piece) -> Vec<Move> {
    let mut moves = Vec::new();
    match rule(piece.kind) {
      Rule::Pawn => self.pawn_moves(piece, &mut moves),
      Rule::Offsets { slides, jumps } => {
        for direction in slides {
          self.slide(piece, *direction, &mut moves);
        }
        for offset in jumps {
          self.jump(piece, *offset, &mut moves);
        }
      }
    }
    moves
  }

  fn slide(&self, piece: &Piece, direction: (i8, i8), moves: &mut Vec<Move>) {
    let mut target = piece.coords.offset(direction);
    while target.is_valid() {
      match self.piece_at(target) {
        None => moves.push(Move::new(*piece, target, None)),
        Some(other) => {
          if other.color != piece.color {
            moves.push(Move::new(*piece, target, Some(other)));
          }
          break;
        }
      }
      target = target.offset(direction);
    }
  }

  fn jump(&self, piece: &Piece, offset: (i8, i8), moves: &mut Vec<Move>) {
    let target = piece.coords.offset(offset);
    if target.is_valid() {
      match self.piece_at(target) {
        None => moves.push(Move::new(*piece, target, None)),
        Some(other) if other.color != piece.color => {
          moves.push(Move::new(*piece, target, Some(other)));
        }
        Some(_) => (),
      }
    }
  }

  fn pawn_moves(&self, pawn: &Piece, moves: &mut Vec<Move>) {
    let forward = pawn.color.forward();
    let push = |target: Coords, captured: Option<Piece>, moves: &mut Vec<Move>| {
      let r#move = Move::new(*pawn, target, captured);
      moves.push(if target.rank == pawn.color.promotion_rank() {
        r#move.with_promotion(PieceKind::Queen)
      } else {
        r#move
      });
    };

    let single = pawn.coords.offset((0, forward));
    if single.is_valid() && self.piece_at(single).is_none() {
      push(single, None, moves);
      let double = single.offset((0, forward));
      if !pawn.moved
        && pawn.coords.rank == pawn.color.pawn_rank()
        && double.is_valid()
        && self.piece_at(double).is_none()
      {
        push(double, None, moves);
      }
    }

    for side in [-1, 1] {
      let target = pawn.coords.offset((side, forward));
      if let Some(other) = self.piece_at(target) {
        if other.color != pawn.color {
          push(target, Some(other), moves);
        }
      }
    }
  }
}
