//! Move values and the errors raised when a move cannot be played.

use crate::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A mark placed at a 1-based board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// 1-based position in the flattened grid.
    pub position: usize,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(mark: Mark, position: usize) -> Self {
        Self { mark, position }
    }

    /// Returns the mark being placed.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the target position.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Position lies outside `1..=max`.
    #[display("Position {} is out of range (1-{})", position, max)]
    OutOfRange {
        /// Requested position.
        position: usize,
        /// Highest valid position.
        max: usize,
    },

    /// The cell at the position already holds a mark.
    #[display("Position {} is already taken", _0)]
    Occupied(usize),

    /// The match has already finished.
    #[display("Game is already over")]
    GameOver,

    /// It is not this mark's turn.
    #[display("It's not {}'s turn", _0)]
    WrongMark(Mark),
}

impl std::error::Error for MoveError {}
