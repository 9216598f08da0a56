//! Turn-based session state machine.
//!
//! A [`Session`] coordinates the human actor and the computed actor over a
//! single game. The phase is a tagged variant, so a finished session always
//! carries its outcome and a live one never does.
//!
//! ```text
//!            submit_human_move            run_ai_turn
//! HumanTurn ──────────────────▶ AiTurn ──────────────▶ HumanTurn
//!     │                           │
//!     └──── line or full ─────────┴──────▶ Terminal(outcome)
//! ```
//!
//! `Terminal` is absorbing. Starting over means building a new session.

use super::contracts::{AiTurnContract, Contract, HumanMoveContract};
use super::error::{GameError, IllegalMoveError, InvalidStateError};
use super::search;
use super::types::{Board, Mark, Move, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

/// Whose turn it is, or how the game ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Phase {
    /// Waiting for the human's move.
    #[display("human to move")]
    HumanTurn,
    /// Waiting for the computed actor's reply.
    #[display("AI to move")]
    AiTurn,
    /// Game over. Never holds [`Outcome::InProgress`].
    #[display("game over: {_0}")]
    Terminal(Outcome),
}

/// A move as recorded in the session history.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new,
)]
pub struct PlayedMove {
    /// Who played it.
    pub mark: Mark,
    /// Where.
    pub mv: Move,
}

/// Read-only view of a session for a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Copy of the board.
    pub board: Board,
    /// Active turn or terminal outcome.
    pub phase: Phase,
    /// Moves played so far, oldest first.
    pub history: Vec<PlayedMove>,
}

/// A single game between the human and the computed actor.
///
/// The session owns its board exclusively; search borrows it mutably for
/// the duration of the AI's turn and hands it back unchanged apart from
/// the chosen mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(super) board: Board,
    pub(super) phase: Phase,
    pub(super) history: Vec<PlayedMove>,
}

impl Session {
    /// Starts a fresh game: empty board, human to move.
    #[instrument]
    pub fn new() -> Self {
        info!("Starting new session");
        Self {
            board: Board::new(),
            phase: Phase::HumanTurn,
            history: Vec::new(),
        }
    }

    /// Rebuilds a session from the human's moves, letting the AI reply
    /// after each one.
    ///
    /// # Errors
    ///
    /// Fails on the first human move the session rejects, including moves
    /// given after the game has ended.
    #[instrument]
    pub fn replay(moves: &[Move]) -> Result<Self, GameError> {
        let mut session = Self::new();
        for mv in moves {
            session.play_turn(*mv)?;
        }
        Ok(session)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the move history.
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// Returns the outcome once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Terminal(outcome) => Some(outcome),
            Phase::HumanTurn | Phase::AiTurn => None,
        }
    }

    /// Returns true once the game is over.
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Snapshot of board, phase and history.
    pub fn current_state(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            phase: self.phase,
            history: self.history.clone(),
        }
    }

    /// Applies the human's move.
    ///
    /// Returns the new phase: [`Phase::AiTurn`], or [`Phase::Terminal`] if
    /// the move ended the game.
    ///
    /// # Errors
    ///
    /// [`IllegalMoveError`] if it is not the human's turn, the coordinate is
    /// off the board, or the cell is taken. The session is unchanged.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn submit_human_move(&mut self, mv: Move) -> Result<Phase, IllegalMoveError> {
        if let Err(e) = HumanMoveContract::pre(self, &mv) {
            warn!(error = %e, "Rejected human move");
            return Err(e);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.place(mv, Mark::Human)?;
        self.advance(Phase::AiTurn);

        #[cfg(debug_assertions)]
        super::contracts::assert_transition::<HumanMoveContract, Move>(&before, self);

        info!(%mv, phase = %self.phase, "Human moved");
        Ok(self.phase)
    }

    /// Lets the computed actor reply to the human's last move.
    ///
    /// Returns the move the AI chose.
    ///
    /// # Errors
    ///
    /// [`InvalidStateError::NotAiTurn`] outside [`Phase::AiTurn`]; the
    /// session is unchanged.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn run_ai_turn(&mut self) -> Result<Move, InvalidStateError> {
        AiTurnContract::pre(self, &())?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mv = search::best_move(&mut self.board)?;
        // Search only returns empty on-board cells.
        let placed = self.place(mv, Mark::Ai);
        if let Err(e) = &placed {
            error!(error = %e, %mv, "Search produced an illegal move");
        }
        debug_assert!(placed.is_ok(), "Search produced an illegal move: {placed:?}");
        self.advance(Phase::HumanTurn);

        #[cfg(debug_assertions)]
        super::contracts::assert_transition::<AiTurnContract, ()>(&before, self);

        info!(%mv, phase = %self.phase, "AI moved");
        Ok(mv)
    }

    /// Plays a full round: the human's move, then the AI's reply if the
    /// game is still live.
    ///
    /// # Errors
    ///
    /// Any error from [`Session::submit_human_move`] or
    /// [`Session::run_ai_turn`].
    pub fn play_turn(&mut self, mv: Move) -> Result<Phase, GameError> {
        if self.submit_human_move(mv)? == Phase::AiTurn {
            self.run_ai_turn()?;
        }
        Ok(self.phase)
    }

    fn place(&mut self, mv: Move, mark: Mark) -> Result<(), IllegalMoveError> {
        self.board.apply_move(mv, mark)?;
        self.history.push(PlayedMove::new(mark, mv));
        Ok(())
    }

    /// Moves to `next`, or to `Terminal` if the board is decided.
    fn advance(&mut self, next: Phase) {
        let outcome = self.board.evaluate();
        self.phase = if outcome.is_terminal() {
            info!(%outcome, "Game over");
            Phase::Terminal(outcome)
        } else {
            next
        };
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
