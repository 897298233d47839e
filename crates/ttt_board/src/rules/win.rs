//! Win detection logic.

use crate::{Board, Cell, Mark};
use tracing::instrument;

/// Every winning line on the board as zero-based cell indices: each row,
/// each column, then the main and anti diagonal.
pub fn lines(board: &Board) -> Vec<Vec<usize>> {
    let n = board.size().dimension();
    let mut lines = Vec::with_capacity(2 * n + 2);

    for row in 0..n {
        lines.push((0..n).map(|col| row * n + col).collect());
    }
    for col in 0..n {
        lines.push((0..n).map(|row| row * n + col).collect());
    }
    lines.push((0..n).map(|i| i * n + i).collect());
    lines.push((0..n).map(|i| i * n + (n - 1 - i)).collect());

    lines
}

/// Whether `mark` occupies every cell of some row, column or full diagonal.
#[instrument(skip(board), fields(size = %board.size()))]
pub fn has_line(board: &Board, mark: Mark) -> bool {
    let cells = board.cells();
    lines(board)
        .iter()
        .any(|line| line.iter().all(|&i| cells[i] == Cell::Marked(mark)))
}

/// Returns the mark that completed a line, if any.
pub fn check_winner(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&mark| has_line(board, mark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSize;

    fn board_with(size: BoardSize, moves: &[(usize, Mark)]) -> Board {
        let mut board = Board::new(size);
        for &(position, mark) in moves {
            board.apply_move(position, mark).unwrap();
        }
        board
    }

    #[test]
    fn test_line_count() {
        assert_eq!(lines(&Board::new(BoardSize::Three)).len(), 8);
        assert_eq!(lines(&Board::new(BoardSize::Four)).len(), 10);
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new(BoardSize::Three);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(BoardSize::Three, &[(1, Mark::X), (2, Mark::X), (3, Mark::X)]);
        assert!(has_line(&board, Mark::X));
        assert!(!has_line(&board, Mark::O));
        assert_eq!(check_winner(&board), Some(Mark::X));
    }

    #[test]
    fn test_winner_anti_diagonal_four() {
        let board = board_with(
            BoardSize::Four,
            &[(4, Mark::O), (7, Mark::O), (10, Mark::O), (13, Mark::O)],
        );
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_three_in_a_row_does_not_win_four() {
        let board = board_with(BoardSize::Four, &[(1, Mark::X), (2, Mark::X), (3, Mark::X)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_winner_mixed_line() {
        let board = board_with(BoardSize::Three, &[(1, Mark::X), (5, Mark::O), (9, Mark::X)]);
        assert_eq!(check_winner(&board), None);
    }
}
