//! Mark balance invariant: the human is never behind, and never more than one ahead.

use super::super::{Board, Mark, Session};
use super::Invariant;
use tracing::warn;

/// Invariant: human mark count equals AI mark count, or exceeds it by one.
///
/// The human always moves first, so the counts are equal right after the
/// AI replies and differ by one while the AI is to move.
pub struct MarkBalanceInvariant;

impl Invariant<Board> for MarkBalanceInvariant {
    fn holds(board: &Board) -> bool {
        let human = board.count(Mark::Human);
        let ai = board.count(Mark::Ai);

        let valid = human == ai || human == ai + 1;
        if !valid {
            warn!(human, ai, "Mark balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Human marks equal AI marks or exceed them by one"
    }
}

impl Invariant<Session> for MarkBalanceInvariant {
    fn holds(session: &Session) -> bool {
        <Self as Invariant<Board>>::holds(session.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}
