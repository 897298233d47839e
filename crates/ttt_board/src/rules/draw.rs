//! Draw detection logic.

use crate::Board;

/// Checks whether every cell has been played.
///
/// Relies on the board's move counter, which always equals the number of
/// marked cells.
pub fn is_full(board: &Board) -> bool {
    board.moves() == board.size().cell_count()
}

/// A full board with no completed line.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && super::check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSize, Mark};

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new(BoardSize::Three);
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new(BoardSize::Four);
        board.apply_move(6, Mark::X).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X
        let mut board = Board::new(BoardSize::Three);
        for (position, mark) in [
            (1, Mark::X),
            (2, Mark::O),
            (3, Mark::X),
            (5, Mark::O),
            (4, Mark::X),
            (6, Mark::O),
            (8, Mark::X),
            (7, Mark::O),
            (9, Mark::X),
        ] {
            board.apply_move(position, mark).unwrap();
        }
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let mut board = Board::new(BoardSize::Three);
        for (position, mark) in [
            (1, Mark::X),
            (4, Mark::O),
            (2, Mark::X),
            (5, Mark::O),
            (3, Mark::X),
        ] {
            board.apply_move(position, mark).unwrap();
        }
        assert!(!is_draw(&board));
    }
}
