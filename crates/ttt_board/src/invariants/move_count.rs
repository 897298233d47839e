//! Move counter invariant: the counter matches the marked cells.

use super::Invariant;
use crate::{Cell, MatchInProgress};

/// Invariant: the board's move count equals its number of marked cells.
pub struct MoveCountInvariant;

impl Invariant<MatchInProgress> for MoveCountInvariant {
    fn holds(game: &MatchInProgress) -> bool {
        let marked = game
            .board()
            .cells()
            .iter()
            .filter(|cell| matches!(cell, Cell::Marked(_)))
            .count();
        marked == game.board().moves()
    }

    fn description() -> &'static str {
        "Move count equals the number of marked cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSize, Mark, MatchResult, MatchSetup, Move};

    #[test]
    fn test_empty_match_holds() {
        let game = MatchSetup::new(BoardSize::Four).start(Mark::O);
        assert!(MoveCountInvariant::holds(&game));
    }

    #[test]
    fn test_holds_after_moves() {
        let game = MatchSetup::new(BoardSize::Three).start(Mark::X);
        let Ok(MatchResult::InProgress(game)) = game.make_move(Move::new(Mark::X, 1)) else {
            panic!("Expected in-progress match");
        };
        let Ok(MatchResult::InProgress(game)) = game.make_move(Move::new(Mark::O, 9)) else {
            panic!("Expected in-progress match");
        };
        assert_eq!(game.board().moves(), 2);
        assert!(MoveCountInvariant::holds(&game));
    }
}
