//! Move sources for the two sides of a match.

mod bot;
mod human;
mod input;

pub use bot::BotActor;
pub use human::HumanActor;
pub use input::{Entry, InputSource};

use derive_more::Display;
use ttt_board::{Board, Mark};

/// Failure to obtain a move from an actor.
#[derive(Debug, Display)]
pub enum ActorError {
    /// The input source reached end of input.
    #[display("Input closed before a move was chosen")]
    InputClosed,
    /// Asked for a move on a board with no open cell.
    #[display("No open positions left")]
    NoOpenPositions,
    /// Reading input or writing a prompt failed.
    #[display("I/O error: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for ActorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActorError::Io(e) => Some(e),
            ActorError::InputClosed | ActorError::NoOpenPositions => None,
        }
    }
}

impl From<std::io::Error> for ActorError {
    fn from(err: std::io::Error) -> Self {
        ActorError::Io(err)
    }
}

/// Something that can pick the next move for one side.
pub trait Actor {
    /// Returns a position that is open on `board` for `mark` to play.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError`] when no move can be produced.
    fn get_move(&mut self, board: &Board, mark: Mark) -> Result<usize, ActorError>;

    /// Returns the actor's display name.
    fn name(&self) -> &str;

    /// Whether moves are chosen without user input.
    fn is_automated(&self) -> bool {
        false
    }
}

impl<A: Actor + ?Sized> Actor for Box<A> {
    fn get_move(&mut self, board: &Board, mark: Mark) -> Result<usize, ActorError> {
        (**self).get_move(board, mark)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_automated(&self) -> bool {
        (**self).is_automated()
    }
}
