//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark, Move};

/// The eight winning lines: three rows, three columns, two diagonals.
pub const LINES: [[Move; 3]; 8] = [
    // Rows
    [Move { row: 0, col: 0 }, Move { row: 0, col: 1 }, Move { row: 0, col: 2 }],
    [Move { row: 1, col: 0 }, Move { row: 1, col: 1 }, Move { row: 1, col: 2 }],
    [Move { row: 2, col: 0 }, Move { row: 2, col: 1 }, Move { row: 2, col: 2 }],
    // Columns
    [Move { row: 0, col: 0 }, Move { row: 1, col: 0 }, Move { row: 2, col: 0 }],
    [Move { row: 0, col: 1 }, Move { row: 1, col: 1 }, Move { row: 2, col: 1 }],
    [Move { row: 0, col: 2 }, Move { row: 1, col: 2 }, Move { row: 2, col: 2 }],
    // Diagonals
    [Move { row: 0, col: 0 }, Move { row: 1, col: 1 }, Move { row: 2, col: 2 }],
    [Move { row: 0, col: 2 }, Move { row: 1, col: 1 }, Move { row: 2, col: 0 }],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if that mark fills a whole line, `None` otherwise.
/// A board reachable by legal play has at most one winner, so the order in
/// which lines are scanned does not matter.
pub fn check_winner(board: &Board) -> Option<Mark> {
    for [a, b, c] in LINES {
        let cell = board.get(a);
        if let Some(Cell::Occupied(mark)) = cell
            && cell == board.get(b)
            && cell == board.get(c)
        {
            return Some(mark);
        }
    }

    None
}
