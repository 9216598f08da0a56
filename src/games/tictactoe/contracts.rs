//! Contract-based validation for session transitions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::error::{IllegalMoveError, InvalidStateError};
use super::invariants::{InvariantSet, InvariantViolation, SessionInvariants};
use super::session::{Phase, Session};
use super::types::{Cell, Move};
use tracing::{error, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Error reported when the precondition fails.
    type Error;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Error>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Human move preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session is waiting for the human.
pub struct HumansTurn;

impl HumansTurn {
    /// Fails with [`IllegalMoveError::NotHumanTurn`] in any other phase.
    pub fn check(session: &Session) -> Result<(), IllegalMoveError> {
        match session.phase() {
            Phase::HumanTurn => Ok(()),
            other => Err(IllegalMoveError::NotHumanTurn(other)),
        }
    }
}

/// Precondition: the coordinate is on the board.
pub struct InRange;

impl InRange {
    /// Fails with [`IllegalMoveError::OutOfRange`] for off-board coordinates.
    pub fn check(mv: &Move) -> Result<(), IllegalMoveError> {
        if mv.in_range() {
            Ok(())
        } else {
            Err(IllegalMoveError::OutOfRange {
                row: mv.row,
                col: mv.col,
            })
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`IllegalMoveError::CellOccupied`] when the cell is taken.
    pub fn check(mv: &Move, session: &Session) -> Result<(), IllegalMoveError> {
        if session.board().is_empty(*mv) {
            Ok(())
        } else {
            Err(IllegalMoveError::CellOccupied(*mv))
        }
    }
}

/// Composite precondition for a human move: right turn, on the board, empty cell.
pub struct LegalHumanMove;

impl LegalHumanMove {
    /// Validates all preconditions, reporting the first that fails.
    #[instrument(skip(session))]
    pub fn check(mv: &Move, session: &Session) -> Result<(), IllegalMoveError> {
        HumansTurn::check(session)?;
        InRange::check(mv)?;
        CellIsEmpty::check(mv, session)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: exactly one empty cell was filled and nothing else changed.
pub struct OneMarkAdded;

impl OneMarkAdded {
    /// Compares the boards before and after a transition.
    pub fn holds(before: &Session, after: &Session) -> bool {
        let mut added = 0;
        for (old, new) in before.board().cells().iter().zip(after.board().cells()) {
            match (old, new) {
                (Cell::Empty, Cell::Occupied(_)) => added += 1,
                (old, new) if old == new => {}
                _ => return false,
            }
        }
        added == 1 && after.history().len() == before.history().len() + 1
    }

    fn description() -> &'static str {
        "Exactly one empty cell filled per transition"
    }
}

fn transition_holds(before: &Session, after: &Session) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = match SessionInvariants::check_all(after) {
        Ok(()) => Vec::new(),
        Err(violations) => violations,
    };
    if !OneMarkAdded::holds(before, after) {
        violations.push(InvariantViolation::new(OneMarkAdded::description()));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition contracts
// ─────────────────────────────────────────────────────────────

/// Contract for a human move.
///
/// Preconditions:
/// - It is the human's turn
/// - The coordinate is on the board
/// - The cell is empty
///
/// Postconditions:
/// - Session invariants hold
/// - Exactly one cell was filled
pub struct HumanMoveContract;

impl Contract<Session, Move> for HumanMoveContract {
    type Error = IllegalMoveError;

    fn pre(session: &Session, mv: &Move) -> Result<(), IllegalMoveError> {
        LegalHumanMove::check(mv, session)
    }

    fn post(before: &Session, after: &Session) -> Result<(), Vec<InvariantViolation>> {
        transition_holds(before, after)
    }
}

/// Contract for the AI's reply.
///
/// Precondition: it is the AI's turn. Postconditions as for the human move.
pub struct AiTurnContract;

impl Contract<Session, ()> for AiTurnContract {
    type Error = InvalidStateError;

    fn pre(session: &Session, _action: &()) -> Result<(), InvalidStateError> {
        match session.phase() {
            Phase::AiTurn => Ok(()),
            other => Err(InvalidStateError::NotAiTurn(other)),
        }
    }

    fn post(before: &Session, after: &Session) -> Result<(), Vec<InvariantViolation>> {
        transition_holds(before, after)
    }
}

/// Asserts a transition honoured its contract (panics in debug builds only).
pub fn assert_transition<C, A>(before: &Session, after: &Session)
where
    C: Contract<Session, A>,
{
    if let Err(violations) = C::post(before, after) {
        for violation in &violations {
            error!(%violation, "Postcondition failed");
        }
        debug_assert!(violations.is_empty(), "Postcondition failed: {violations:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_precondition_empty_cell() {
        let session = Session::new();
        assert!(HumanMoveContract::pre(&session, &Move::new(1, 1)).is_ok());
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let session = Session::replay(&[Move::new(0, 0)]).unwrap();
        assert_eq!(
            HumanMoveContract::pre(&session, &Move::new(0, 0)),
            Err(IllegalMoveError::CellOccupied(Move::new(0, 0)))
        );
    }

    #[test]
    fn test_precondition_out_of_range() {
        let session = Session::new();
        assert_eq!(
            HumanMoveContract::pre(&session, &Move::new(0, 7)),
            Err(IllegalMoveError::OutOfRange { row: 0, col: 7 })
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let mut session = Session::new();
        session.submit_human_move(Move::new(1, 1)).unwrap();
        assert_eq!(
            HumanMoveContract::pre(&session, &Move::new(0, 0)),
            Err(IllegalMoveError::NotHumanTurn(Phase::AiTurn))
        );
        assert!(AiTurnContract::pre(&session, &()).is_ok());
    }

    #[test]
    fn test_ai_precondition_on_human_turn() {
        let session = Session::new();
        assert_eq!(
            AiTurnContract::pre(&session, &()),
            Err(InvalidStateError::NotAiTurn(Phase::HumanTurn))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = Session::new();
        let mut after = before.clone();
        after.submit_human_move(Move::new(2, 1)).unwrap();
        assert!(HumanMoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = Session::new();
        let mut after = before.clone();
        after.submit_human_move(Move::new(2, 1)).unwrap();
        after.board.apply_move(Move::new(0, 0), Mark::Ai).unwrap();

        let violations = HumanMoveContract::post(&before, &after).unwrap_err();
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_postcondition_requires_progress() {
        let before = Session::new();
        let after = before.clone();
        assert!(HumanMoveContract::post(&before, &after).is_err());
    }
}
