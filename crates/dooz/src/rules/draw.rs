//! Draw detection.

use super::win::find_winning_line;
use crate::board::Board;
use tracing::instrument;

/// Checks if the board is full (all cells owned).
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A draw is a full board without a winning line.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && find_winning_line(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Seat};

    fn fill(board: &mut Board, rows: &[&str]) {
        for (r, row) in rows.iter().enumerate() {
            for (c, mark) in row.chars().enumerate() {
                let seat = match mark {
                    'X' => Seat::First,
                    'O' => Seat::Second,
                    _ => continue,
                };
                board.set_owner(Position::new(r, c), seat).expect("empty cell");
            }
        }
    }

    #[test]
    fn test_empty_board_not_draw() {
        for size in 3..=6 {
            let board = Board::new(size).expect("valid size");
            assert!(!is_full(&board));
            assert!(!is_draw(&board));
        }
    }

    #[test]
    fn test_partial_board_not_draw() {
        let mut board = Board::new(3).expect("valid size");
        fill(&mut board, &["XO.", "...", "..."]);
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_draw_detection_3x3() {
        let mut board = Board::new(3).expect("valid size");
        fill(&mut board, &["XOX", "OXX", "OXO"]);
        assert!(is_full(&board));
        assert!(find_winning_line(&board).is_none());
        assert!(is_draw(&board));
    }

    #[test]
    fn test_draw_detection_4x4() {
        let mut board = Board::new(4).expect("valid size");
        fill(&mut board, &["XXOO", "OOXX", "XXOO", "OOXX"]);
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let mut board = Board::new(3).expect("valid size");
        fill(&mut board, &["XXX", "OOX", "XOO"]);
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
