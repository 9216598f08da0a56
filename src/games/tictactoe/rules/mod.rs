//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from board
//! storage so search, contracts and the session all evaluate positions
//! the same way.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_winner, LINES};

use super::{Board, Outcome};

/// Evaluates a board.
///
/// All eight lines are scanned before the full-board check, so a move that
/// completes a line on the last empty cell is a win, not a draw.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::won_by(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
