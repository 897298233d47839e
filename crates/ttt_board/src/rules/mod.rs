//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). The board delegates to
//! these so the rules can be tested and composed on their own.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, has_line, lines};
