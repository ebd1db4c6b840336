use capablanca::perft::perft;
use capablanca::positions::STARTPOS;
use capablanca::Board;
use std::env;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[cfg(feature = "parallel")]
use threadpool::ThreadPool;

// positions with more nodes than this are skipped by the regression run
const LIMIT: usize = 2_000_000;

fn print_time(fen: &str, time: Duration, depth: usize, nodes: usize) {
  let secs = time.as_secs();
  let millis = time.as_millis();
  let kilonodes = nodes / usize::max(millis as usize, 1);
  let time = if secs >= 30 {
    format!("{secs} s")
  } else {
    format!("{millis} ms")
  };
  println!("{fen} {time} for depth {depth} ({kilonodes} knodes/s)");
}

// count the nodes below each root move on its own thread
fn divide(board: &Board, depth: usize) -> usize {
  #[cfg(feature = "parallel")]
  let pool = ThreadPool::default();

  let (tx, rx) = channel();
  let moves = board.all_legal(board.to_move());
  let num_moves = moves.len();
  for r#move in moves {
    let tx = tx.clone();
    let position = board.clone();
    let closure = move || {
      let mut position = position;
      let nodes = position
        .execute(&r#move)
        .and_then(|_| perft(&position, depth - 1))
        .unwrap();
      info!(played = %r#move, nodes, "divide");
      tx.send(nodes).unwrap();
    };
    #[cfg(feature = "parallel")]
    pool.execute(closure);
    #[cfg(not(feature = "parallel"))]
    closure();
  }
  #[cfg(feature = "parallel")]
  pool.join();
  rx.iter().take(num_moves).sum()
}

fn perft_test(fen: &str, results: &[usize]) {
  let board = Board::new(fen).unwrap();
  assert_eq!(board.to_string(), fen);
  let start = Instant::now();
  let mut max = 0;
  let mut nodes = 0;
  for (i, result) in results.iter().enumerate() {
    if result <= &LIMIT {
      max = i;
      nodes += result;
    } else {
      break;
    }
  }

  for (i, result) in results.iter().enumerate().take(max) {
    assert_eq!(perft(&board, i).unwrap(), *result, "{fen} depth {i}");
  }
  assert_eq!(divide(&board, max), results[max], "{fen} depth {max}");
  print_time(fen, start.elapsed(), max, nodes);
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "perft=warn".into()),
    )
    .init();

  // `perft <fen> <depth>` counts a single position
  let args: Vec<String> = env::args().skip(1).collect();
  if let [fen, depth] = args.as_slice() {
    let board = match Board::new(fen) {
      Ok(board) => board,
      Err(error) => {
        warn!(%error, %fen, "invalid position");
        return;
      }
    };
    let Ok(depth) = depth.parse::<usize>() else {
      warn!(%depth, "invalid depth");
      return;
    };
    let start = Instant::now();
    let nodes = if depth == 0 { 1 } else { divide(&board, depth) };
    println!("{nodes} nodes");
    print_time(fen, start.elapsed(), depth, nodes);
    return;
  }

  let start = Instant::now();

  // castling first becomes possible at ply 7
  perft_test(
    STARTPOS,
    &[1, 28, 784, 25_228, 805_128, 28_741_319, 1_015_802_437],
  );
  // both castling moves are available immediately
  perft_test("r4k3r/10/10/10/10/10/10/R4K3R w KQkq - 0 1", &[1, 28]);

  println!("{} ms", start.elapsed().as_millis());
}
