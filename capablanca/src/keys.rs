use crate::coords::{HEIGHT, WIDTH};
use crate::{CastleSide, Color, Coords, Piece};
use array2d::Array2D;
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaChaRng;
use std::sync::OnceLock;

/// A Zobrist hash of a position
pub type Hash = u64;

// one key per side and kind
const PIECE_KEYS: usize = 16;

pub struct ZobristKeys {
  pieces: Array2D<[Hash; PIECE_KEYS]>,
  en_passant: Array2D<Hash>,
  to_move: Hash,
  castling: [Hash; 4],
}

impl ZobristKeys {
  fn new() -> Self {
    // fixed seed so hashes are stable between runs
    let mut rng = ChaChaRng::seed_from_u64(0x0a7c_4b1e_5eed_10c8);
    let mut keys = Self {
      pieces: Array2D::filled_with([0; PIECE_KEYS], HEIGHT, WIDTH),
      en_passant: Array2D::filled_with(0, HEIGHT, WIDTH),
      to_move: rng.gen(),
      castling: [0; 4],
    };

    rng.fill(&mut keys.castling[..]);

    for rank in 0..HEIGHT {
      for file in 0..WIDTH {
        rng.fill(&mut keys.pieces[(rank, file)][..]);
        keys.en_passant[(rank, file)] = rng.gen();
      }
    }

    keys
  }

  pub fn piece(&self, piece: &Piece) -> Hash {
    self.pieces[piece.coords.index()][piece.color.index() * 8 + piece.kind.index()]
  }

  pub fn en_passant(&self, coords: Coords) -> Hash {
    self.en_passant[coords.index()]
  }

  pub const fn to_move(&self) -> Hash {
    self.to_move
  }

  pub const fn castling(&self, color: Color, side: CastleSide) -> Hash {
    self.castling[color.index() * 2 + side.index()]
  }
}

/// The keys are the same for every board, so they are generated once
pub fn keys() -> &'static ZobristKeys {
  static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
  KEYS.get_or_init(ZobristKeys::new)
}
