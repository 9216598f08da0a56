//! Exhaustive minimax search for the computed actor.
//!
//! Every reachable terminal position below the current board is scored; no
//! branch is ever pruned. Terminal scores are fixed (+10 AI win, -10 human
//! win, 0 draw) regardless of depth, so a quick win is not preferred over a
//! slow one.
//!
//! The board is searched in place. Each provisional mark is held by a
//! [`Provisional`] guard that erases it when the guard is dropped, so every
//! exit from a branch restores the board before the next branch runs.
//!
//! Ties always resolve to the first move in row-major order that reaches
//! the best score: comparisons are strict, so later equal moves never
//! replace an earlier one.

use super::error::InvalidStateError;
use super::types::{Board, Cell, Mark, Move, Outcome};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Score of a board the AI has won.
pub const WIN_SCORE: i32 = 10;

/// Score of a board the human has won.
pub const LOSS_SCORE: i32 = -10;

/// Score of a drawn board.
pub const DRAW_SCORE: i32 = 0;

/// Fixed score of a finished board, `None` while the game is still live.
pub fn terminal_score(outcome: Outcome) -> Option<i32> {
    match outcome {
        Outcome::AiWins => Some(WIN_SCORE),
        Outcome::HumanWins => Some(LOSS_SCORE),
        Outcome::Draw => Some(DRAW_SCORE),
        Outcome::InProgress => None,
    }
}

// ─────────────────────────────────────────────────────────────
//  Place/undo guard
// ─────────────────────────────────────────────────────────────

/// A mark placed for exploration only.
///
/// Derefs to the board so recursion continues through the guard; dropping
/// it clears the cell again.
struct Provisional<'a> {
    board: &'a mut Board,
    mv: Move,
}

impl<'a> Provisional<'a> {
    fn place(board: &'a mut Board, mv: Move, mark: Mark) -> Self {
        debug_assert!(board.is_empty(mv), "provisional move on occupied cell {mv}");
        board.write(mv, Cell::Occupied(mark));
        Self { board, mv }
    }
}

impl Deref for Provisional<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Provisional<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Provisional<'_> {
    fn drop(&mut self) {
        self.board.undo_move(self.mv);
    }
}

// ─────────────────────────────────────────────────────────────
//  Recursive scoring
// ─────────────────────────────────────────────────────────────

/// Depth-first minimax walker. Counts visited positions.
#[derive(Debug, Default)]
struct Minimax {
    nodes: u64,
}

impl Minimax {
    fn score(&mut self, board: &mut Board, maximizing: bool) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(board.evaluate()) {
            return score;
        }

        let mark = if maximizing { Mark::Ai } else { Mark::Human };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in board.available_moves() {
            let value = {
                let mut provisional = Provisional::place(board, mv, mark);
                self.score(&mut provisional, !maximizing)
            };

            let improves = if maximizing { value > best } else { value < best };
            if improves {
                best = value;
            }
        }

        best
    }
}

/// Minimax value of `board` with `maximizing` naming the side to move
/// (`true` for the AI, `false` for the human).
///
/// The board is returned exactly as it was passed in.
pub fn score(board: &mut Board, maximizing: bool) -> i32 {
    Minimax::default().score(board, maximizing)
}

// ─────────────────────────────────────────────────────────────
//  Root move selection
// ─────────────────────────────────────────────────────────────

/// A candidate root move and its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScoredMove {
    /// The AI move.
    mv: Move,
    /// Value of the position after the move, with the human to reply.
    score: i32,
}

/// Full result of a root search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Analysis {
    /// Every available move in row-major order with its value.
    scored: Vec<ScoredMove>,
    /// The chosen move: the first one reaching the best value.
    best: Move,
    /// Value of the chosen move.
    score: i32,
    /// Positions visited, root children included.
    nodes: u64,
}

/// Scores every AI move on `board` and picks the best.
///
/// # Errors
///
/// Returns [`InvalidStateError::AlreadyDecided`] on a finished board and
/// [`InvalidStateError::NoAvailableMoves`] on a board with no empty cell.
#[instrument(skip(board), fields(open_cells = board.available_moves().len()))]
pub fn analyze(board: &mut Board) -> Result<Analysis, InvalidStateError> {
    let outcome = board.evaluate();
    if outcome.is_terminal() {
        return Err(InvalidStateError::AlreadyDecided(outcome));
    }

    let mut search = Minimax::default();
    let mut scored = Vec::new();
    let mut best: Option<ScoredMove> = None;

    for mv in board.available_moves() {
        let value = {
            let mut provisional = Provisional::place(board, mv, Mark::Ai);
            search.score(&mut provisional, false)
        };
        let candidate = ScoredMove { mv, score: value };
        scored.push(candidate);

        match best {
            Some(current) if value <= current.score => {}
            _ => best = Some(candidate),
        }
    }

    let best = best.ok_or(InvalidStateError::NoAvailableMoves)?;
    debug!(
        best = %best.mv,
        score = best.score,
        nodes = search.nodes,
        "Search complete"
    );

    Ok(Analysis {
        scored,
        best: best.mv,
        score: best.score,
        nodes: search.nodes,
    })
}

/// Picks the game-theoretically optimal AI move on `board`.
///
/// Pure in effect: the same board always yields the same move, and the
/// board is left unchanged.
///
/// # Errors
///
/// Same as [`analyze`].
pub fn best_move(board: &mut Board) -> Result<Move, InvalidStateError> {
    analyze(board).map(|analysis| analysis.best)
}
