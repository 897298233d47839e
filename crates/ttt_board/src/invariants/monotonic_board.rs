//! Monotonic board invariant: cells never change once marked.

use super::Invariant;
use crate::{Board, MatchInProgress};

/// Invariant: board cells are monotonic (never overwritten).
///
/// Replaying the move history onto a fresh board must succeed without
/// touching an occupied cell and reproduce the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<MatchInProgress> for MonotonicBoardInvariant {
    fn holds(game: &MatchInProgress) -> bool {
        let mut reconstructed = Board::new(game.board().size());

        for mov in game.history() {
            if reconstructed.apply_move(mov.position, mov.mark).is_err() {
                return false;
            }
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
