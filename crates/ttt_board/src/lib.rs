//! Pure tic-tac-toe board logic.
//!
//! Square boards of dimension 3 or 4, cells labelled `1`..`9` then `A`..,
//! win and draw rules, and a phase-typed match:
//!
//! - [`MatchSetup`] - fresh board, nobody to move yet
//! - [`MatchInProgress`] - accepts moves from the side to move
//! - [`MatchFinished`] - always carries an [`Outcome`]
//!
//! # Example
//!
//! ```
//! use ttt_board::{BoardSize, Mark, MatchInProgress, Move, Outcome};
//!
//! let moves = [
//!     Move::new(Mark::X, 1),
//!     Move::new(Mark::O, 2),
//!     Move::new(Mark::X, 4),
//!     Move::new(Mark::O, 5),
//!     Move::new(Mark::X, 7),
//! ];
//! let finished = MatchInProgress::replay(BoardSize::Three, Mark::X, &moves)
//!     .unwrap()
//!     .into_finished()
//!     .unwrap();
//! assert_eq!(finished.outcome(), Outcome::Winner(Mark::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod invariants;
mod phases;
pub mod rules;
mod typestate;
mod types;

pub use action::{Move, MoveError};
pub use phases::{GameStatus, Outcome};
pub use typestate::{MatchFinished, MatchInProgress, MatchResult, MatchSetup, MoveRejected};
pub use types::{Board, BoardSize, BoardSizeError, Cell, Mark, position_label};
