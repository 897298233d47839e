//! Invariants that hold for every match in progress.
//!
//! Checked after each move in debug builds and testable on their own.

pub mod monotonic_board;
pub mod move_count;

pub use monotonic_board::MonotonicBoardInvariant;
pub use move_count::MoveCountInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Returns every violated invariant, or `Ok(())` when all hold.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (MoveCountInvariant, MonotonicBoardInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSize, Mark, MatchResult, MatchSetup, Move};

    #[test]
    fn test_invariant_set_holds_for_new_match() {
        let game = MatchSetup::new(BoardSize::Three).start(Mark::X);
        assert!(BoardInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_tampered_board() {
        let game = MatchSetup::new(BoardSize::Three).start(Mark::X);
        let Ok(MatchResult::InProgress(mut game)) = game.make_move(Move::new(Mark::X, 5)) else {
            panic!("Expected in-progress match");
        };

        // A mark that never went through make_move
        game.board.apply_move(1, Mark::O).unwrap();

        let violations = BoardInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            MonotonicBoardInvariant::description()
        );
    }
}
