use crate::{Board, ChessError};

/// Run perft on the specified position
///
/// # Errors
///
/// Will return `Err` if a generated move cannot be applied, which indicates a movegen bug
pub fn perft(board: &Board, depth: usize) -> Result<usize, ChessError> {
  if depth > 0 {
    let mut result = 0;
    for r#move in board.all_legal(board.to_move()) {
      let mut position = board.clone();
      position.execute(&r#move)?;
      result += perft(&position, depth - 1)?;
    }
    Ok(result)
  } else {
    Ok(1)
  }
}
