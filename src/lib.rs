//! Strictly Minimax - tic-tac-toe against an opponent that cannot lose.
//!
//! # Architecture
//!
//! - **Board model**: cells, move legality and outcome evaluation
//! - **Search**: exhaustive minimax with row-major, first-max tie-breaking
//! - **Session**: the human/AI turn protocol as a tagged state machine
//! - **Frontend**: line-based terminal play over any reader/writer
//!
//! # Example
//!
//! ```
//! use strictly_minimax::{Move, Phase, Session};
//!
//! # fn example() -> Result<(), strictly_minimax::GameError> {
//! let mut session = Session::new();
//! session.submit_human_move(Move::new(0, 0))?;
//! let reply = session.run_ai_turn()?;
//! assert_eq!(reply, Move::new(1, 1));
//! assert_eq!(session.phase(), Phase::HumanTurn);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod frontend;
mod games;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};

// Crate-level exports - Terminal frontend
pub use frontend::{Input, InputError, parse_input, run as run_frontend};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AiTurnContract, Analysis, Board, BoardParseError, CELLS, Cell, CellIsEmpty, Contract,
    GameError, HumanMoveContract, HumansTurn, IllegalMoveError, InRange, InvalidStateError,
    LegalHumanMove, Mark, Move, OneMarkAdded, Outcome, Phase, PlayedMove, SIZE, ScoredMove,
    Session, Snapshot, analyze, best_move, score,
};

// Crate-level exports - Rules, search constants and invariants
pub use games::tictactoe::{invariants, rules, search};
