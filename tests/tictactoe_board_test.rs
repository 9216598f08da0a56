//! Tests for board evaluation and move enumeration.

use strictly_minimax::rules::{LINES, check_winner};
use strictly_minimax::{Board, Cell, Mark, Move, Outcome};
use strum::IntoEnumIterator;

/// Fills one line with `mark` and balances the counts with opponent marks
/// placed so they cannot form a line of their own.
fn board_with_line(line: [Move; 3], mark: Mark) -> Board {
    let mut board = Board::new();
    for mv in line {
        board.apply_move(mv, mark).unwrap();
    }
    let mut placed = 0;
    for mv in board.available_moves() {
        if placed == 3 {
            break;
        }
        board.apply_move(mv, mark.opponent()).unwrap();
        if has_line(&board, mark.opponent()) {
            board.undo_move(mv);
        } else {
            placed += 1;
        }
    }
    board
}

fn has_line(board: &Board, mark: Mark) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|mv| board.get(*mv) == Some(Cell::Occupied(mark))))
}

#[test]
fn test_every_line_wins_for_both_marks() {
    for mark in Mark::iter() {
        for line in LINES {
            let board = board_with_line(line, mark);
            assert!(
                !has_line(&board, mark.opponent()),
                "opponent also has a line\n{}",
                board.display()
            );
            assert_eq!(check_winner(&board), Some(mark));
            assert_eq!(
                board.evaluate(),
                Outcome::won_by(mark),
                "line {line:?} for {mark}\n{}",
                board.display()
            );
        }
    }
}

#[test]
fn test_two_in_a_line_is_in_progress() {
    for line in LINES {
        let mut board = Board::new();
        board.apply_move(line[0], Mark::Human).unwrap();
        board.apply_move(line[1], Mark::Human).unwrap();
        assert_eq!(board.evaluate(), Outcome::InProgress);
    }
}

#[test]
fn test_draw_only_when_full() {
    let draw: Board = "XOX/XOO/OXX".parse().unwrap();
    assert_eq!(draw.evaluate(), Outcome::Draw);
    assert!(draw.is_full());
    assert!(draw.available_moves().is_empty());

    let mut almost = draw.clone();
    almost.undo_move(Move::new(2, 2));
    assert_eq!(almost.evaluate(), Outcome::InProgress);
}

#[test]
fn test_available_moves_empty_board() {
    let moves = Board::new().available_moves();
    assert_eq!(moves.len(), 9);
    assert_eq!(moves.first(), Some(&Move::new(0, 0)));
    assert_eq!(moves.last(), Some(&Move::new(2, 2)));
    assert!(moves.windows(2).all(|pair| pair[0].index() < pair[1].index()));
}

#[test]
fn test_apply_then_undo() {
    let mut board = Board::new();
    board.apply_move(Move::new(0, 2), Mark::Ai).unwrap();
    assert_eq!(board.get(Move::new(0, 2)), Some(Cell::Occupied(Mark::Ai)));
    board.undo_move(Move::new(0, 2));
    assert_eq!(board.get(Move::new(0, 2)), Some(Cell::Empty));
}

#[test]
fn test_board_serializes() {
    let board: Board = "X../.O./...".parse().unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}
