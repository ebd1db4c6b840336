use crate::keys::keys;
use crate::moves::{Move, MoveKind};
use crate::{
  Board, CastleSide, CastlingRights, ChessError, Color, Coords, Piece, PieceKind,
};
use enum_iterator::all;
use tracing::{debug, warn};

/// Everything collaborators need to know about an executed move
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoveOutcome {
  /// The move that was played
  pub played: Move,
  /// The piece removed from the board, if any
  pub captured: Option<Piece>,
  /// The piece a pawn promoted into, if any
  pub promoted: Option<Piece>,
  /// The en passant target for the next ply
  pub en_passant: Option<Coords>,
  /// The castling rights this move revoked
  pub revoked: CastlingRights,
  /// Whether the side now to move is in check
  pub check: bool,
}

impl Board {
  /// Plays a move, applying every side effect or none of them.
  ///
  /// The move is assumed to be legal, legality is established by move generation.
  ///
  /// # Errors
  ///
  /// Will return `Err` without changing the board if the move is malformed,
  /// for example castling without its rook or promoting to a king.
  pub fn execute(&mut self, played: &Move) -> Result<MoveOutcome, ChessError> {
    self.check_structure(played).map_err(|reason| {
      warn!(%played, reason, "rejected malformed move");
      ChessError::StructuralViolation {
        played: played.to_string(),
        reason,
      }
    })?;

    let castling = self.castling;
    let mut mover = self.piece_at(played.from).ok_or(ChessError::EmptySquare(played.from))?;
    mover.moved = true;

    // captures first, en passant removes a piece off the destination
    let captured = played.capture_square().and_then(|square| {
      let captured = self.piece_at(square);
      self.place(square, None);
      captured
    });

    self.place(played.from, None);
    let promoted = match played.promotion {
      Some(kind) => {
        let piece = Piece {
          kind,
          moved: true,
          ..mover
        };
        self.place(played.to, Some(piece));
        self.piece_at(played.to)
      }
      None => {
        self.place(played.to, Some(mover));
        None
      }
    };
    if let Some((from, to)) = played.rook {
      if let Some(mut rook) = self.piece_at(from) {
        rook.moved = true;
        self.place(from, None);
        self.place(to, Some(rook));
      }
    }

    self.update_castling(&mover, played);

    let en_passant = (mover.kind == PieceKind::Pawn
      && (played.to.rank - played.from.rank).abs() == 2)
      .then(|| Coords::new(played.from.file, (played.from.rank + played.to.rank) / 2));
    self.set_en_passant(en_passant);

    if mover.kind == PieceKind::Pawn || captured.is_some() {
      self.halfmoves = 0;
    } else {
      self.halfmoves = self.halfmoves.saturating_add(1);
    }

    if self.to_move == Color::Black {
      self.moves = self.moves.saturating_add(1);
    }
    self.to_move = !self.to_move;
    self.hash ^= keys().to_move();

    #[cfg(feature = "validate")]
    self.report_inconsistency(played);

    let check = self.in_check(self.to_move);
    debug!(%played, check, hash = self.hash, "executed move");

    Ok(MoveOutcome {
      played: *played,
      captured,
      promoted,
      en_passant,
      revoked: castling.difference(&self.castling),
      check,
    })
  }

  // everything that could stop the move being applied as a whole
  fn check_structure(&self, played: &Move) -> Result<(), &'static str> {
    if !played.from.is_valid() || !played.to.is_valid() {
      return Err("coordinates are off the board");
    }
    match self.piece_at(played.from) {
      Some(piece) if piece.is(played.piece.kind, played.piece.color) => (),
      _ => return Err("the moving piece is not on its origin square"),
    }

    match played.captured {
      Some(captured) => {
        if captured.kind == PieceKind::King {
          return Err("kings cannot be captured");
        }
        match self.piece_at(captured.coords) {
          Some(piece) if piece.is(captured.kind, captured.color) => (),
          _ => return Err("the captured piece is not on the board"),
        }
      }
      None => {
        if self.piece_at(played.to).is_some() {
          return Err("the destination is occupied");
        }
      }
    }

    match played.kind {
      MoveKind::Normal | MoveKind::Capture => {
        if played.promotion.is_some() || played.rook.is_some() {
          return Err("a plain move carries special move data");
        }
        if (played.kind == MoveKind::Capture) != played.captured.is_some() {
          return Err("capture does not match the captured piece");
        }
      }
      MoveKind::Castling => {
        let Some((from, to)) = played.rook else {
          return Err("castling without its rook");
        };
        if played.piece.kind != PieceKind::King {
          return Err("only the king can castle");
        }
        if !from.is_valid() || !to.is_valid() {
          return Err("rook coordinates are off the board");
        }
        match self.piece_at(from) {
          Some(rook) if rook.is(PieceKind::Rook, played.piece.color) => (),
          _ => return Err("the castling rook is missing"),
        }
        if to != played.to && to != from && self.piece_at(to).is_some() {
          return Err("the rook's destination is occupied");
        }
      }
      MoveKind::EnPassant => {
        let Some(captured) = played.captured else {
          return Err("en passant without a captured pawn");
        };
        if played.piece.kind != PieceKind::Pawn || captured.kind != PieceKind::Pawn {
          return Err("en passant must be played by and against pawns");
        }
        if captured.coords == played.to {
          return Err("en passant captures beside the destination");
        }
        if self.piece_at(played.to).is_some() {
          return Err("the destination is occupied");
        }
      }
      MoveKind::Promotion => {
        if played.piece.kind != PieceKind::Pawn {
          return Err("only pawns can promote");
        }
        match played.promotion {
          Some(kind) if kind.is_promotable() => (),
          Some(_) => return Err("unrecognised promotion kind"),
          None => return Err("promotion without a kind"),
        }
      }
    }
    Ok(())
  }

  fn update_castling(&mut self, mover: &Piece, played: &Move) {
    if mover.kind == PieceKind::King {
      for side in all::<CastleSide>() {
        self.revoke(mover.color, side);
      }
    }
    // a move from a rook's home square, or a capture on it, ends that right for good
    let capture = played.capture_square();
    for color in all::<Color>() {
      for side in all::<CastleSide>() {
        let home = side.rook_home(color);
        if played.from == home || capture == Some(home) {
          self.revoke(color, side);
        }
      }
    }
  }

  #[cfg(feature = "validate")]
  fn report_inconsistency(&self, played: &Move) {
    if let Some(problem) = self.validate() {
      tracing::error!(%played, problem, "board state is inconsistent");
    }
  }

  fn revoke(&mut self, color: Color, side: CastleSide) {
    if self.castling.revoke(color, side) {
      self.hash ^= keys().castling(color, side);
    }
  }

  fn set_en_passant(&mut self, target: Option<Coords>) {
    let keys = keys();
    if let Some(old) = self.en_passant {
      self.hash ^= keys.en_passant(old);
    }
    if let Some(new) = target {
      self.hash ^= keys.en_passant(new);
    }
    self.en_passant = target;
  }
}
