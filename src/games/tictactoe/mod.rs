//! Tic-tac-toe against an unbeatable computed opponent.

mod contracts;
mod error;
pub mod invariants;
pub mod rules;
pub mod search;
mod session;
mod types;

pub use contracts::{
    AiTurnContract, CellIsEmpty, Contract, HumanMoveContract, HumansTurn, InRange,
    LegalHumanMove, OneMarkAdded,
};
pub use error::{BoardParseError, GameError, IllegalMoveError, InvalidStateError};
pub use search::{Analysis, ScoredMove, analyze, best_move, score};
pub use session::{Phase, PlayedMove, Session, Snapshot};
pub use types::{Board, CELLS, Cell, Mark, Move, Outcome, SIZE};
