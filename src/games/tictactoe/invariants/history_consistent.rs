//! History consistency invariant: replaying the history rebuilds the board.

use super::super::{Board, Session};
use super::Invariant;

/// Invariant: the board is exactly the history applied to an empty board.
///
/// Every recorded move landed on an empty cell (cells are never
/// overwritten), and no cell is filled without a recorded move.
pub struct HistoryConsistentInvariant;

impl Invariant<Session> for HistoryConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let mut reconstructed = Board::new();

        for played in session.history() {
            if reconstructed.apply_move(played.mv, played.mark).is_err() {
                return false;
            }
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board matches the move history (cells never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Move, PlayedMove};

    #[test]
    fn test_new_session_holds() {
        assert!(HistoryConsistentInvariant::holds(&Session::new()));
    }

    #[test]
    fn test_multiple_rounds_hold() {
        let session = Session::replay(&[Move::new(0, 0), Move::new(2, 2)]).unwrap();
        assert_eq!(session.history().len(), 4);
        assert!(HistoryConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_unrecorded_mark_violates() {
        let mut session = Session::new();
        session.submit_human_move(Move::new(1, 1)).unwrap();
        session.board.apply_move(Move::new(0, 0), Mark::Ai).unwrap();
        assert!(!HistoryConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_overwritten_cell_violates() {
        let mut session = Session::new();
        session.submit_human_move(Move::new(1, 1)).unwrap();
        session.history.push(PlayedMove::new(Mark::Ai, Move::new(1, 1)));
        assert!(!HistoryConsistentInvariant::holds(&session));
    }
}
