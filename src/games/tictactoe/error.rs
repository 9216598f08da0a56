//! Error types for tic-tac-toe sessions and search.

use super::session::Phase;
use super::types::{Move, Outcome};

/// A move the session refused to apply.
///
/// Recoverable: the session is left exactly as it was, and the caller
/// should ask the human for another move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalMoveError {
    /// The coordinate is off the 3x3 board.
    #[display("Cell ({row}, {col}) is off the board")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {_0} is already occupied")]
    CellOccupied(#[error(not(source))] Move),

    /// A human move arrived outside the human's turn.
    #[display("It is not the human's turn ({_0})")]
    NotHumanTurn(#[error(not(source))] Phase),
}

/// A caller broke the turn protocol.
///
/// Not user-recoverable: it means the hosting code drove the session or the
/// search engine in an order the protocol does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidStateError {
    /// The AI was asked to move outside its turn.
    #[display("It is not the AI's turn ({_0})")]
    NotAiTurn(#[error(not(source))] Phase),

    /// Search was asked for a move on a board with no empty cell.
    #[display("No available moves")]
    NoAvailableMoves,

    /// Search was asked for a move on a finished board.
    #[display("Game is already decided: {_0}")]
    AlreadyDecided(#[error(not(source))] Outcome),
}

/// Any error raised while driving a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
)]
pub enum GameError {
    /// Rejected human move.
    #[display("Illegal move: {_0}")]
    IllegalMove(IllegalMoveError),
    /// Protocol violation.
    #[display("Invalid state: {_0}")]
    InvalidState(InvalidStateError),
}

/// A board string that could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    /// Not exactly nine cells.
    #[display("Expected 9 cells, found {_0}")]
    WrongLength(#[error(not(source))] usize),

    /// A character that is not a mark or an empty-cell symbol.
    #[display("Unknown cell symbol {_0:?}")]
    UnknownSymbol(#[error(not(source))] char),

    /// Mark counts no game with the human moving first can reach.
    #[display("Unbalanced board: {human} human marks, {ai} AI marks")]
    Unbalanced {
        /// Human marks on the board.
        human: usize,
        /// AI marks on the board.
        ai: usize,
    },
}
