//! Alternating turn invariant: human, AI, human, AI, ...

use super::super::{Mark, Phase, Session};
use super::Invariant;

/// Invariant: actors alternate, starting with the human.
///
/// While the game is live the phase must also name the actor whose turn
/// the history implies: the human after an even number of moves, the AI
/// after an odd number.
pub struct AlternatingTurnInvariant;

impl Invariant<Session> for AlternatingTurnInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();

        if let Some(first) = history.first()
            && first.mark != Mark::Human
        {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].mark == pair[1].mark) {
            return false;
        }

        match session.phase() {
            Phase::HumanTurn => history.len() % 2 == 0,
            Phase::AiTurn => history.len() % 2 == 1,
            Phase::Terminal(_) => true,
        }
    }

    fn description() -> &'static str {
        "Actors alternate turns (human, AI, human, ...)"
    }
}
