use crate::movegen::Probe;
use crate::moves::parse_move;
use crate::perft::perft;
use crate::positions::{get_startpos, STARTPOS};
use crate::{
  Board, CastleSide, ChessError, Color, Coords, FenError, Game, Gamestate, Move, MoveKind, Piece,
  PieceKind, SharedGame,
};
use std::thread;

const CASTLING: &str = "r4k3r/10/10/10/10/10/10/R4K3R w KQkq - 0 1";

fn square(name: &str) -> Coords {
  name.parse().unwrap()
}

fn piece(board: &Board, name: &str) -> Piece {
  board.get(square(name)).unwrap().unwrap()
}

fn notation(moves: &[Move]) -> Vec<String> {
  moves.iter().map(ToString::to_string).collect()
}

#[test]
fn coordinates() {
  assert_eq!(square("a1"), Coords::new(0, 0));
  assert_eq!(square("j8"), Coords::new(9, 7));
  assert_eq!(Coords::new(9, 7).to_algebraic().unwrap(), "j8");
  assert_eq!(Coords::new(4, 3).to_string(), "e4");
  for text in ["k1", "a9", "a0", "a10", "A1", ""] {
    assert!(matches!(
      text.parse::<Coords>(),
      Err(ChessError::InvalidCoordinate(_))
    ));
  }
  assert!(Coords::new(10, 0).to_algebraic().is_err());
  assert!(Coords::new(0, -1).checked().is_err());
  assert_eq!(Coords::all().count(), 80);
  for coords in Coords::all() {
    assert_eq!(square(&coords.to_algebraic().unwrap()), coords);
  }
}

#[test]
fn off_board_queries() {
  let board = get_startpos();
  assert!(board.get(Coords::new(10, 0)).is_err());
  assert!(board.legal_moves_from(Coords::new(-1, 3)).is_err());
  assert!(board.legal_moves_from(square("e4")).unwrap().is_empty());
}

#[test]
fn startpos() {
  let board = get_startpos();
  assert_eq!(board.to_string(), STARTPOS);
  assert_eq!(board.all_legal(Color::White).len(), 28);
  assert_eq!(board.all_legal(Color::Black).len(), 28);
  assert_eq!(board.king(Color::White), square("f1"));
  assert_eq!(board.king(Color::Black), square("f8"));
  assert_eq!(piece(&board, "c1").kind, PieceKind::Archbishop);
  assert_eq!(piece(&board, "h8").kind, PieceKind::Chancellor);
  assert_eq!(board.ply(), 0);
}

#[test]
fn startpos_perft() {
  let board = get_startpos();
  assert_eq!(perft(&board, 1).unwrap(), 28);
  assert_eq!(perft(&board, 2).unwrap(), 784);
  assert_eq!(perft(&board, 3).unwrap(), 25_228);
}

#[test]
fn fen_errors() {
  assert_eq!(Board::new("rnabqkbcnr"), Err(FenError::MissingFields));
  assert_eq!(
    Board::new("rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP w KQkq - 0 1"),
    Err(FenError::Size)
  );
  assert_eq!(
    Board::new("rnabqkbcnr/ppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1"),
    Err(FenError::Size)
  );
  assert_eq!(
    Board::new("rnabqkbcnx/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1"),
    Err(FenError::InvalidPiece('x'))
  );
  assert_eq!(
    Board::new("rnabqqbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1"),
    Err(FenError::KingCount)
  );
  assert!(matches!(
    Board::new("rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR x KQkq - 0 1"),
    Err(FenError::InvalidSide(_))
  ));
  assert!(matches!(
    Board::new("rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq z9 0 1"),
    Err(FenError::InvalidSquare(_))
  ));
  assert!(matches!(
    Board::new("rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KXq - 0 1"),
    Err(FenError::InvalidCastling(_))
  ));
}

#[test]
fn fen_counters() {
  assert_eq!(
    Board::new("99999999999999999999999/10/10/10/10/10/10/5K4 w - - 0 1"),
    Err(FenError::Size)
  );
  assert_eq!(
    Board::new("5k4/10/10/10/10/10/10/5K4 w - - 0 0"),
    Err(FenError::InvalidNumber("0".to_owned()))
  );

  let mut game = Game::from_fen("5k4/10/10/10/10/10/10/5K4 b - - 0 65535").unwrap();
  game.play_notation("f8e8").unwrap();
  assert_eq!(game.board().fullmoves(), u16::MAX);
  assert_eq!(game.board().ply(), (u32::from(u16::MAX) - 1) * 2);
}

#[test]
fn en_passant_square_must_be_skipped() {
  // occupied
  assert!(matches!(
    Board::new("5k4/10/3n6/3pP5/10/10/10/5K4 w - d6 0 2"),
    Err(FenError::InvalidSquare(_))
  ));
  // wrong rank for the side that just moved
  assert!(matches!(
    Board::new("5k4/10/10/3pP5/10/10/10/5K4 w - d3 0 2"),
    Err(FenError::InvalidSquare(_))
  ));
  assert!(matches!(
    Board::new("5k4/10/10/3pP5/10/10/10/5K4 b - d6 0 2"),
    Err(FenError::InvalidSquare(_))
  ));
}

#[test]
fn fen_round_trip() {
  for fen in [
    STARTPOS,
    CASTLING,
    "r4k4/1P8/10/10/10/10/10/5K4 w q - 0 1",
    "5k4/10/10/3pP5/10/10/10/5K4 w - d6 0 2",
  ] {
    assert_eq!(Board::new(fen).unwrap().to_string(), fen);
  }
}

#[test]
fn archbishop_moves() {
  let board = Board::new("9k/10/10/10/4A5/10/10/K9 w - - 0 1").unwrap();
  assert_eq!(board.pseudo_legal(&piece(&board, "e4")).len(), 22);
}

#[test]
fn chancellor_moves() {
  let board = Board::new("9k/10/10/10/4C5/10/10/K9 w - - 0 1").unwrap();
  assert_eq!(board.pseudo_legal(&piece(&board, "e4")).len(), 24);
}

#[test]
fn sliders_stop_at_pieces() {
  let board = Board::new("9k/10/10/10/4r5/10/4R5/K9 w - - 0 1").unwrap();
  let moves = board.pseudo_legal(&piece(&board, "e2"));
  let names = notation(&moves);
  assert!(names.contains(&"e2e3".to_owned()));
  assert!(names.contains(&"e2e4".to_owned()));
  assert!(!names.contains(&"e2e5".to_owned()));
  let capture = moves.iter().find(|r#move| r#move.to() == square("e4")).unwrap();
  assert_eq!(capture.kind(), MoveKind::Capture);
  assert_eq!(capture.captured().unwrap().kind, PieceKind::Rook);
}

#[test]
fn legal_moves_are_safe() {
  let fens = [
    STARTPOS,
    CASTLING,
    "4k5/10/10/10/1b8/10/3P6/4K5 w - - 0 1",
    "5k4/10/10/3pP5/10/10/10/5K4 w - d6 0 2",
  ];
  for fen in fens {
    let board = Board::new(fen).unwrap();
    let side = board.to_move();
    for piece in board.pieces(side) {
      let candidates = board.candidates(&piece);
      for r#move in board.legal(&piece) {
        assert!(candidates.contains(&r#move));
        let mut position = board.clone();
        position.execute(&r#move).unwrap();
        assert!(!position.in_check(side), "{fen}: {}", r#move);
      }
    }
  }
}

#[test]
fn pinned_piece() {
  // the d2 pawn is pinned by the bishop on b4
  let board = Board::new("4k5/10/10/10/1b8/10/3P6/4K5 w - - 0 1").unwrap();
  assert!(board.legal(&piece(&board, "d2")).is_empty());
  assert_eq!(board.pseudo_legal(&piece(&board, "d2")).len(), 2);
}

#[test]
fn legality_check_leaves_no_trace() {
  for fen in [STARTPOS, CASTLING, "5k4/10/10/3pP5/10/10/10/5K4 w - d6 0 2"] {
    let board = Board::new(fen).unwrap();
    let mut probe = Probe::new(&board);
    for piece in board.pieces(board.to_move()) {
      for r#move in board.candidates(&piece) {
        if r#move.kind() != MoveKind::Castling {
          probe.is_safe(&r#move);
        }
      }
    }
    assert_eq!(probe.board(), &board);
  }
}

#[test]
fn pawn_attacks_empty_squares() {
  let board = Board::new("5k4/10/10/10/10/10/7p2/5K4 w - - 0 1").unwrap();
  assert!(board.attacks(square("g1"), Color::Black));
  assert!(board.attacks(square("i1"), Color::Black));
  assert!(!board.attacks(square("h1"), Color::Black));
}

#[test]
fn castling() {
  let board = Board::new(CASTLING).unwrap();
  let names = notation(&board.legal(&piece(&board, "f1")));
  assert!(names.contains(&"f1i1".to_owned()));
  assert!(names.contains(&"f1c1".to_owned()));
}

#[test]
fn castling_through_attack() {
  // the rook on g5 covers g1
  let board = Board::new("r4k3r/10/10/6r3/10/10/10/R4K3R w KQkq - 0 1").unwrap();
  let names = notation(&board.legal(&piece(&board, "f1")));
  assert!(!names.contains(&"f1i1".to_owned()));
  assert!(names.contains(&"f1c1".to_owned()));

  // the pawn on h2 covers g1 and i1
  let board = Board::new("r4k3r/10/10/10/10/10/7p2/R4K3R w KQkq - 0 1").unwrap();
  let names = notation(&board.legal(&piece(&board, "f1")));
  assert!(!names.contains(&"f1i1".to_owned()));
  assert!(names.contains(&"f1c1".to_owned()));
}

#[test]
fn castling_blocked() {
  let board = Board::new("r4k3r/10/10/10/10/10/10/RN3K3R w KQkq - 0 1").unwrap();
  let names = notation(&board.legal(&piece(&board, "f1")));
  assert!(names.contains(&"f1i1".to_owned()));
  assert!(!names.contains(&"f1c1".to_owned()));
}

#[test]
fn castling_in_check() {
  let board = Board::new("r4k3r/10/10/10/10/10/5r4/R4K3R w KQ - 0 1").unwrap();
  assert!(board.in_check(Color::White));
  assert!(board.castling_moves(&piece(&board, "f1")).is_empty());
}

#[test]
fn castling_rights_are_permanent() {
  let mut game = Game::from_fen(CASTLING).unwrap();
  for text in ["f1f2", "f8f7", "f2f1", "f7f8"] {
    game.play_notation(text).unwrap();
  }
  let board = game.board();
  assert!(!board.castling().any(Color::White));
  assert!(!board.castling().any(Color::Black));
  assert!(board.castling_moves(&piece(board, "f1")).is_empty());
  assert_eq!(board.to_string(), "r4k3r/10/10/10/10/10/10/R4K3R w - - 4 3");
}

#[test]
fn play_castling() {
  let mut game = Game::from_fen(CASTLING).unwrap();
  let outcome = game.play_notation("f1i1").unwrap();
  let board = game.board();
  assert_eq!(outcome.played.kind(), MoveKind::Castling);
  assert!(piece(board, "i1").is(PieceKind::King, Color::White));
  assert!(piece(board, "h1").is(PieceKind::Rook, Color::White));
  assert!(board.get(square("j1")).unwrap().is_none());
  assert!(board.get(square("f1")).unwrap().is_none());
  assert_eq!(board.king(Color::White), square("i1"));
  assert!(outcome.revoked.get(Color::White, CastleSide::King));
  assert!(outcome.revoked.get(Color::White, CastleSide::Queen));
  assert!(!outcome.revoked.any(Color::Black));
  assert_eq!(board.to_string(), "r4k3r/10/10/10/10/10/10/R6RK1 b kq - 1 1");
  assert_eq!(board.validate(), None);
}

#[test]
fn queen_side_castling() {
  let mut game = Game::from_fen(CASTLING).unwrap();
  game.play_notation("f1c1").unwrap();
  let board = game.board();
  assert!(piece(board, "c1").is(PieceKind::King, Color::White));
  assert!(piece(board, "d1").is(PieceKind::Rook, Color::White));
  assert!(board.get(square("a1")).unwrap().is_none());
}

#[test]
fn rook_capture_revokes_castling() {
  let mut game = Game::from_fen(CASTLING).unwrap();
  let outcome = game.play_notation("a1a8").unwrap();
  assert!(outcome.check);
  assert!(outcome.revoked.get(Color::White, CastleSide::Queen));
  assert!(outcome.revoked.get(Color::Black, CastleSide::Queen));
  let castling = game.board().castling();
  assert!(castling.get(Color::White, CastleSide::King));
  assert!(castling.get(Color::Black, CastleSide::King));
  assert!(!castling.get(Color::Black, CastleSide::Queen));
}

#[test]
fn en_passant() {
  let mut game = Game::from_fen("5k4/3p6/10/4P5/10/10/10/5K4 b - - 0 1").unwrap();
  assert_eq!(game.board().legal_moves_from(square("e5")).unwrap().len(), 1);

  let outcome = game.play_notation("d7d5").unwrap();
  assert_eq!(outcome.en_passant, Some(square("d6")));
  assert_eq!(game.board().en_passant(), Some(square("d6")));

  let moves = game.legal_moves_from(square("e5")).unwrap();
  assert_eq!(moves.len(), 2);
  let capture = moves
    .iter()
    .find(|r#move| r#move.kind() == MoveKind::EnPassant)
    .unwrap();
  assert_eq!(capture.to(), square("d6"));
  assert_eq!(capture.capture_square(), Some(square("d5")));

  let outcome = game.play(capture).unwrap();
  assert_eq!(outcome.captured.unwrap().coords, square("d5"));
  let board = game.board();
  assert!(board.get(square("d5")).unwrap().is_none());
  assert!(piece(board, "d6").is(PieceKind::Pawn, Color::White));
  assert_eq!(board.en_passant(), None);
}

#[test]
fn en_passant_expires() {
  let mut game = Game::from_fen("5k4/3p6/10/4P5/10/10/10/5K4 b - - 0 1").unwrap();
  for text in ["d7d5", "f1g1", "f8g8"] {
    game.play_notation(text).unwrap();
  }
  assert_eq!(game.legal_moves_from(square("e5")).unwrap().len(), 1);
  assert!(matches!(
    game.play_notation("e5d6"),
    Err(ChessError::IllegalMove(_))
  ));
}

#[test]
fn promotion() {
  let board = Board::new("5k4/1P8/10/10/10/10/10/5K4 w - - 0 1").unwrap();
  let pawn = piece(&board, "b7");
  let pseudo = board.pseudo_legal(&pawn);
  assert_eq!(pseudo.len(), 1);
  assert_eq!(pseudo[0].promotion(), Some(PieceKind::Queen));
  let legal = board.legal(&pawn);
  assert_eq!(legal.len(), 6);
  for kind in PieceKind::PROMOTIONS {
    assert!(legal.iter().any(|r#move| r#move.promotion() == Some(kind)));
  }

  let queen = legal
    .iter()
    .find(|r#move| r#move.promotion() == Some(PieceKind::Queen))
    .unwrap();
  let mut position = board.clone();
  let outcome = position.execute(queen).unwrap();
  let promoted = piece(&position, "b8");
  assert!(promoted.is(PieceKind::Queen, Color::White));
  assert_eq!(outcome.promoted, Some(promoted));
  assert!(position.get(square("b7")).unwrap().is_none());
  assert!(position.pieces(Color::White).iter().all(|piece| piece.kind != PieceKind::Pawn));
}

#[test]
fn capturing_promotion() {
  let mut game = Game::from_fen("r4k4/1P8/10/10/10/10/10/5K4 w q - 0 1").unwrap();
  let moves = game.legal_moves_from(square("b7")).unwrap();
  assert_eq!(moves.len(), 12);
  assert_eq!(moves.iter().filter(|r#move| r#move.is_capture()).count(), 6);

  let outcome = game.play_notation("b7a8c").unwrap();
  let promoted = outcome.promoted.unwrap();
  assert!(promoted.is(PieceKind::Chancellor, Color::White));
  assert_eq!(promoted.coords, square("a8"));
  assert!(outcome.captured.unwrap().is(PieceKind::Rook, Color::Black));
  assert!(outcome.revoked.get(Color::Black, CastleSide::Queen));
  assert!(outcome.check);
  assert_eq!(game.history().last().unwrap().notation, "b7a8c+");
  assert_eq!(game.board().halfmoves(), 0);
}

#[test]
fn malformed_moves_leave_the_board_unchanged() {
  let board = Board::new("5k4/1P8/10/10/10/10/10/5K4 w - - 0 1").unwrap();

  let mut position = board.clone();
  let king_promotion =
    Move::new(piece(&board, "b7"), square("b8"), None).with_promotion(PieceKind::King);
  assert!(matches!(
    position.execute(&king_promotion),
    Err(ChessError::StructuralViolation { .. })
  ));
  assert_eq!(position, board);

  let no_rook = Move::castling(
    piece(&board, "f1"),
    square("i1"),
    square("j1"),
    square("h1"),
  );
  assert!(matches!(
    position.execute(&no_rook),
    Err(ChessError::StructuralViolation { .. })
  ));
  assert_eq!(position, board);

  let stale = Move::new(Piece::new(PieceKind::Rook, Color::White, square("a1")), square("a2"), None);
  assert!(position.execute(&stale).is_err());
  assert_eq!(position, board);
}

#[test]
fn en_passant_onto_a_piece() {
  let board = Board::new("5k4/10/3n6/3pP5/10/10/10/5K4 w - - 0 2").unwrap();
  let capture = Move::en_passant(piece(&board, "e5"), square("d6"), piece(&board, "d5"));
  let mut position = board.clone();
  assert!(matches!(
    position.execute(&capture),
    Err(ChessError::StructuralViolation { .. })
  ));
  assert_eq!(position, board);
  assert_eq!(position.pieces(Color::Black).len(), 3);
}

#[test]
fn move_equality() {
  let board = Board::new(CASTLING).unwrap();
  let rook = piece(&board, "a1");
  let target = piece(&board, "a8");
  let knight = Piece::new(PieceKind::Knight, Color::Black, square("a8"));

  let capture = Move::new(rook, square("a8"), Some(target));
  let moved = Piece {
    moved: true,
    ..rook
  };
  assert_eq!(capture, Move::new(moved, square("a8"), Some(target)));
  assert_ne!(capture, Move::new(rook, square("a8"), Some(knight)));
  assert_ne!(capture, Move::new(rook, square("a8"), None));
  assert_ne!(capture, Move::new(rook, square("a7"), None));
}

#[test]
fn parse_moves() {
  assert_eq!(
    parse_move("e2e4").unwrap(),
    (square("e2"), square("e4"), None)
  );
  assert_eq!(
    parse_move("b7b8a").unwrap(),
    (square("b7"), square("b8"), Some(PieceKind::Archbishop))
  );
  for text in ["e2", "e2e4k", "e2e4x", "k2e4", "e2e4qq"] {
    assert!(matches!(
      parse_move(text),
      Err(ChessError::InvalidNotation(_))
    ));
  }
}

#[test]
fn counters() {
  let mut game = Game::new();
  game.play_notation("e2e4").unwrap();
  assert_eq!(game.board().halfmoves(), 0);
  assert_eq!(game.board().fullmoves(), 1);
  assert_eq!(game.board().to_move(), Color::Black);
  game.play_notation("b8c6").unwrap();
  assert_eq!(game.board().halfmoves(), 1);
  assert_eq!(game.board().fullmoves(), 2);
  assert_eq!(game.board().ply(), 2);
  assert_eq!(game.history().to_string(), "1. e2e4 b8c6");
}

#[test]
fn incremental_hash() {
  let mut game = Game::new();
  for text in ["e2e4", "d7d5", "e4d5", "c8d6", "b1c3", "i8h6"] {
    game.play_notation(text).unwrap();
    let board = game.board();
    assert_eq!(board.validate(), None, "after {text}");
    let reparsed = Board::new(&board.to_string()).unwrap();
    assert_eq!(reparsed.hash(), board.hash(), "after {text}");
  }
}

#[test]
fn fifty_move_rule() {
  let mut game = Game::from_fen("5k4/10/10/10/10/10/10/R4K4 w - - 99 50").unwrap();
  assert_eq!(game.state(), Gamestate::InProgress);
  game.play_notation("a1a2").unwrap();
  assert!(game.board().fifty_move_draw());
  assert_eq!(game.state(), Gamestate::Move50);
  assert_eq!(game.play_notation("f8f7"), Err(ChessError::GameOver));

  let mut game = Game::from_fen("5k4/9r/10/10/10/10/10/5K3R w - - 57 30").unwrap();
  game.play_notation("j1j2").unwrap();
  assert_eq!(game.board().halfmoves(), 58);
  game.play_notation("j7i7").unwrap();
  game.play_notation("j2i2").unwrap();
  assert_eq!(game.board().halfmoves(), 60);
  let outcome = game.play_notation("i2i7").unwrap();
  assert!(outcome.captured.unwrap().is(PieceKind::Rook, Color::Black));
  assert_eq!(game.board().halfmoves(), 0);
  assert!(!game.board().fifty_move_draw());

  let mut game = Game::from_fen("5k4/10/10/10/10/10/P9/5K4 w - - 99 50").unwrap();
  game.play_notation("a2a3").unwrap();
  assert_eq!(game.board().halfmoves(), 0);
  assert!(!game.board().fifty_move_draw());
  assert_eq!(game.state(), Gamestate::InProgress);
}

#[test]
fn checkmate() {
  let game = Game::from_fen("k9/1Q8/1K8/10/10/10/10/10 b - - 0 1").unwrap();
  assert!(game.board().in_check(Color::Black));
  assert!(!game.board().has_legal(Color::Black));
  assert_eq!(game.state(), Gamestate::Checkmate(Color::White));
  assert!(game.legal_moves().is_empty());
}

#[test]
fn stalemate() {
  let game = Game::from_fen("k9/2Q7/1K8/10/10/10/10/10 b - - 0 1").unwrap();
  assert!(!game.board().in_check(Color::Black));
  assert_eq!(game.state(), Gamestate::Stalemate);
}

#[test]
fn mate_notation() {
  let mut game = Game::from_fen("k9/10/1K8/10/10/10/10/2Q7 w - - 0 1").unwrap();
  game.play_notation("c1c7").unwrap();
  assert_eq!(game.state(), Gamestate::Stalemate);

  let mut game = Game::from_fen("k9/10/1K8/10/10/10/10/7Q2 w - - 0 1").unwrap();
  game.play_notation("h1b7").unwrap();
  assert_eq!(game.state(), Gamestate::Checkmate(Color::White));
  assert_eq!(game.history().to_string(), "1. h1b7#");
}

#[test]
fn repetition() {
  let mut game = Game::new();
  let shuffle = ["b1c3", "b8c6", "c3b1", "c6b8"];
  for text in shuffle {
    game.play_notation(text).unwrap();
  }
  assert_eq!(game.state(), Gamestate::InProgress);
  for text in shuffle {
    game.play_notation(text).unwrap();
  }
  assert_eq!(game.state(), Gamestate::Repetition);
  assert_eq!(game.history().len(), 8);
}

#[test]
fn illegal_moves() {
  let mut game = Game::new();
  assert!(matches!(
    game.play_notation("e2e5"),
    Err(ChessError::IllegalMove(_))
  ));
  assert!(matches!(
    game.play_notation("e7e5"),
    Err(ChessError::IllegalMove(_))
  ));
  assert!(matches!(
    game.play_notation("zz"),
    Err(ChessError::InvalidNotation(_))
  ));
  assert!(game.legal_moves_from(square("e7")).unwrap().is_empty());
  assert_eq!(game.board(), &get_startpos());
  assert!(game.history().is_empty());
}

#[test]
fn new_game() {
  let mut game = Game::from_fen(CASTLING).unwrap();
  game.play_notation("f1i1").unwrap();
  game.new_game();
  assert!(game.history().is_empty());
  assert_eq!(game.board().to_string(), CASTLING);
  assert_eq!(game.state(), Gamestate::InProgress);
}

#[test]
fn shared_game() {
  let shared = SharedGame::default();
  let handles: Vec<_> = ["e2e4", "d2d4"]
    .into_iter()
    .map(|text| {
      let shared = shared.clone();
      thread::spawn(move || shared.play_notation(text).is_ok())
    })
    .collect();
  let played = handles
    .into_iter()
    .map(|handle| handle.join().unwrap())
    .filter(|played| *played)
    .count();
  // whichever move lands second is a white move on black's turn
  assert_eq!(played, 1);
  assert_eq!(shared.snapshot().to_move(), Color::Black);
  assert_eq!(shared.with(|game| game.history().len()), 1);
  assert_eq!(shared.state(), Gamestate::InProgress);
  assert_eq!(shared.legal_moves_from(square("e7")).unwrap().len(), 2);
}
