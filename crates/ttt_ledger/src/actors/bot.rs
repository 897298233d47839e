//! Automated actor picking uniformly among open positions.

use super::{Actor, ActorError};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, instrument};
use ttt_board::{Board, Mark};

/// Picks a random open position after a short pause.
#[derive(Debug)]
pub struct BotActor<R = StdRng> {
    name: String,
    rng: R,
    think: Duration,
}

impl<R: Rng> BotActor<R> {
    /// Creates a bot drawing from `rng`.
    pub fn new(name: impl Into<String>, rng: R, think: Duration) -> Self {
        Self {
            name: name.into(),
            rng,
            think,
        }
    }
}

impl BotActor<StdRng> {
    /// Bot with a reproducible move sequence.
    pub fn seeded(name: impl Into<String>, seed: u64, think: Duration) -> Self {
        Self::new(name, StdRng::seed_from_u64(seed), think)
    }

    /// Bot seeded from the operating system.
    pub fn from_os_rng(name: impl Into<String>, think: Duration) -> Self {
        Self::new(name, StdRng::from_os_rng(), think)
    }
}

impl<R: Rng> Actor for BotActor<R> {
    #[instrument(skip(self, board), fields(name = %self.name, %mark))]
    fn get_move(&mut self, board: &Board, mark: Mark) -> Result<usize, ActorError> {
        let open = board.open_positions();
        let position = *open
            .choose(&mut self.rng)
            .ok_or(ActorError::NoOpenPositions)?;

        if !self.think.is_zero() {
            std::thread::sleep(self.think);
        }

        debug!(position, open = open.len(), "Bot picked position");
        Ok(position)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_automated(&self) -> bool {
        true
    }
}
