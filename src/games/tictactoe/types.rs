//! Core domain types for tic-tac-toe.

use super::error::{BoardParseError, IllegalMoveError};
use super::invariants::{Invariant, MarkBalanceInvariant};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of rows (and columns) on the board.
pub const SIZE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// Which actor a mark belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// The human actor (always moves first).
    #[display("X")]
    Human,
    /// The computed actor.
    #[display("O")]
    Ai,
}

impl Mark {
    /// Returns the other actor's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Human => Mark::Ai,
            Mark::Ai => Mark::Human,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

/// A (row, column) coordinate naming a cell.
///
/// Coordinates are not validated on construction: a move typed in by the
/// human may be out of range, and is rejected when it is submitted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new,
)]
pub struct Move {
    /// Row, 0-based from the top.
    pub row: usize,
    /// Column, 0-based from the left.
    pub col: usize,
}

impl Move {
    /// Returns the row-major cell index, or `None` when off the board.
    pub fn index(self) -> Option<usize> {
        (self.row < SIZE && self.col < SIZE).then_some(self.row * SIZE + self.col)
    }

    /// Creates a move from a row-major cell index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELLS).then(|| Self::new(index / SIZE, index % SIZE))
    }

    /// Returns true if the coordinate lies on the board.
    pub fn in_range(self) -> bool {
        self.index().is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Result of evaluating a board.
///
/// Always derived from a [`Board`], never stored on its own except as the
/// final result of a finished session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Outcome {
    /// The human actor completed a line.
    #[display("Human wins")]
    HumanWins,
    /// The computed actor completed a line.
    #[display("AI wins")]
    AiWins,
    /// Board is full and no line is complete.
    #[display("Draw")]
    Draw,
    /// No line complete and at least one empty cell.
    #[display("In progress")]
    InProgress,
}

impl Outcome {
    /// Outcome in which `mark` has won.
    pub fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::Human => Outcome::HumanWins,
            Mark::Ai => Outcome::AiWins,
        }
    }

    /// Returns true for a win or a draw.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::HumanWins => Some(Mark::Human),
            Outcome::AiWins => Some(Mark::Ai),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Gets the cell at the given coordinate, `None` when off the board.
    pub fn get(&self, mv: Move) -> Option<Cell> {
        mv.index().map(|index| self.cells[index])
    }

    /// Checks if the cell at `mv` is on the board and empty.
    pub fn is_empty(&self, mv: Move) -> bool {
        matches!(self.get(mv), Some(Cell::Empty))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Counts the cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(mark))
            .count()
    }

    /// Writes `mark` into an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError::OutOfRange`] if the coordinate is off the
    /// board and [`IllegalMoveError::CellOccupied`] if the cell is taken.
    /// The board is untouched on error.
    #[instrument(level = "trace", skip(self))]
    pub fn apply_move(&mut self, mv: Move, mark: Mark) -> Result<(), IllegalMoveError> {
        match self.get(mv) {
            None => Err(IllegalMoveError::OutOfRange {
                row: mv.row,
                col: mv.col,
            }),
            Some(Cell::Occupied(_)) => Err(IllegalMoveError::CellOccupied(mv)),
            Some(Cell::Empty) => {
                self.write(mv, Cell::Occupied(mark));
                Ok(())
            }
        }
    }

    /// Resets the cell at `mv` to empty. Off-board coordinates are ignored.
    pub fn undo_move(&mut self, mv: Move) {
        self.write(mv, Cell::Empty);
    }

    /// All empty coordinates in row-major order.
    ///
    /// Search explores moves in exactly this order, which decides which of
    /// several equally scored moves it picks.
    pub fn available_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .filter_map(|(index, _)| Move::from_index(index))
            .collect()
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        super::rules::is_full(self)
    }

    /// Evaluates the board: win, draw or still in progress.
    pub fn evaluate(&self) -> Outcome {
        super::rules::evaluate(self)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based cell number so they can be typed back.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let pos = row * SIZE + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < SIZE - 1 {
                    result.push('|');
                }
            }
            if row < SIZE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    pub(super) fn write(&mut self, mv: Move, cell: Cell) {
        if let Some(index) = mv.index() {
            self.cells[index] = cell;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine row-major cells: `X` human, `O` computed actor, and
    /// `.`, `-` or `_` for empty. Whitespace and `/` row separators are
    /// skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| *c != '/' && !c.is_whitespace())
            .collect();
        if symbols.len() != CELLS {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }

        let mut board = Board::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            board.cells[index] = match symbol.to_ascii_uppercase() {
                'X' => Cell::Occupied(Mark::Human),
                'O' => Cell::Occupied(Mark::Ai),
                '.' | '-' | '_' => Cell::Empty,
                other => return Err(BoardParseError::UnknownSymbol(other)),
            };
        }

        if !<MarkBalanceInvariant as Invariant<Board>>::holds(&board) {
            return Err(BoardParseError::Unbalanced {
                human: board.count(Mark::Human),
                ai: board.count(Mark::Ai),
            });
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_index_round_trip_bounds() {
        assert_eq!(Move::new(0, 0).index(), Some(0));
        assert_eq!(Move::new(1, 1).index(), Some(4));
        assert_eq!(Move::new(2, 2).index(), Some(8));
        assert_eq!(Move::new(3, 0).index(), None);
        assert_eq!(Move::new(0, 3).index(), None);
        assert_eq!(Move::from_index(5), Some(Move::new(1, 2)));
        assert_eq!(Move::from_index(9), None);
    }

    #[test]
    fn test_available_moves_row_major() {
        let mut board = Board::new();
        board.apply_move(Move::new(0, 1), Mark::Human).unwrap();
        board.apply_move(Move::new(1, 1), Mark::Ai).unwrap();

        let moves = board.available_moves();
        assert_eq!(
            moves,
            vec![
                Move::new(0, 0),
                Move::new(0, 2),
                Move::new(1, 0),
                Move::new(1, 2),
                Move::new(2, 0),
                Move::new(2, 1),
                Move::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_apply_move_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        board.apply_move(Move::new(1, 1), Mark::Human).unwrap();

        assert_eq!(
            board.apply_move(Move::new(1, 1), Mark::Ai),
            Err(IllegalMoveError::CellOccupied(Move::new(1, 1)))
        );
        assert_eq!(
            board.apply_move(Move::new(5, 0), Mark::Ai),
            Err(IllegalMoveError::OutOfRange { row: 5, col: 0 })
        );
        assert_eq!(board.get(Move::new(1, 1)), Some(Cell::Occupied(Mark::Human)));
        assert_eq!(board.count(Mark::Ai), 0);
    }

    #[test]
    fn test_undo_restores_empty() {
        let mut board = Board::new();
        board.apply_move(Move::new(2, 0), Mark::Ai).unwrap();
        board.undo_move(Move::new(2, 0));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let mut board = Board::new();
        board.apply_move(Move::new(0, 0), Mark::Human).unwrap();
        board.apply_move(Move::new(1, 1), Mark::Ai).unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "XO./.X./..O".parse().unwrap();
        assert_eq!(board.get(Move::new(0, 0)), Some(Cell::Occupied(Mark::Human)));
        assert_eq!(board.get(Move::new(0, 1)), Some(Cell::Occupied(Mark::Ai)));
        assert_eq!(board.get(Move::new(2, 2)), Some(Cell::Occupied(Mark::Ai)));
        assert_eq!(board.available_moves().len(), 5);
    }

    #[test]
    fn test_parse_board_with_spaced_rows() {
        let spaced: Board = "XO. .X. ..O".parse().unwrap();
        let slashed: Board = "XO./.X./..O".parse().unwrap();
        assert_eq!(spaced, slashed);
        assert_eq!(
            "XO  X  .O".parse::<Board>(),
            Err(BoardParseError::WrongLength(5))
        );
    }

    #[test]
    fn test_parse_board_errors() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(BoardParseError::WrongLength(2))
        );
        assert_eq!(
            "XOZ......".parse::<Board>(),
            Err(BoardParseError::UnknownSymbol('Z'))
        );
        assert_eq!(
            "OO.......".parse::<Board>(),
            Err(BoardParseError::Unbalanced { human: 0, ai: 2 })
        );
    }
}
