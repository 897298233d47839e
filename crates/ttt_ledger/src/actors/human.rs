//! Interactive actor reading positions from an input source.

use super::{Actor, ActorError, Entry, InputSource};
use tracing::{debug, instrument};
use ttt_board::{Board, Mark};

/// Asks a person for each move, re-prompting until the position is valid.
#[derive(Debug)]
pub struct HumanActor<I> {
    name: String,
    input: I,
}

impl<I: InputSource> HumanActor<I> {
    /// Creates an actor that reads from `input`.
    pub fn new(name: impl Into<String>, input: I) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

impl<I: InputSource> Actor for HumanActor<I> {
    #[instrument(skip(self, board), fields(name = %self.name, %mark))]
    fn get_move(&mut self, board: &Board, mark: Mark) -> Result<usize, ActorError> {
        let max = board.max_position();
        if board.open_positions().is_empty() {
            return Err(ActorError::NoOpenPositions);
        }

        loop {
            self.input.show(&format!("{}'s turn ({})", self.name, mark))?;
            let entry = self
                .input
                .read_number(&format!("Enter position (1-{}): ", max))?;

            match entry {
                Entry::Number(n) => match usize::try_from(n) {
                    Ok(position) if board.is_position_open(position) => {
                        debug!(position, "Position entered");
                        return Ok(position);
                    }
                    _ => debug!(entered = n, "Position unavailable"),
                },
                Entry::Text(text) => debug!(%text, "Position not a number"),
                Entry::Closed => return Err(ActorError::InputClosed),
            }

            self.input.show(&format!(
                "Invalid move! Position must be between 1-{} and not already taken.",
                max
            ))?;
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
