//! Match engine driving turn alternation between two actors.

use crate::actors::{Actor, ActorError};
use crate::participants::{GameMode, Side, Slot};
use crate::StoreError;
use derive_getters::Getters;
use derive_more::{Display, From};
use derive_new::new;
use tracing::{debug, info, instrument, warn};
use ttt_board::{Board, BoardSize, Mark, MatchResult, MatchSetup, Move, Outcome};

/// Choices made before the first move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct MatchSettings {
    size: BoardSize,
    mode: GameMode,
    first: Side,
}

/// A finished match.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MatchReport {
    settings: MatchSettings,
    outcome: Outcome,
    board: Board,
    moves: Vec<Move>,
}

impl MatchReport {
    /// Side that won, `None` for a draw.
    pub fn winner_side(&self) -> Option<Side> {
        self.outcome.winner().map(Side::from_mark)
    }

    /// Slot that won, `None` for a draw.
    pub fn winner_slot(&self) -> Option<Slot> {
        self.winner_side()
            .map(|side| self.settings.mode.slot(side))
    }
}

/// Something the engine tells about a match as it unfolds.
#[derive(Debug, Clone, Copy)]
pub enum MatchEvent<'a> {
    /// The board is set up and the first turn is next.
    Started(&'a MatchSettings),
    /// `name` is about to choose a move for `mark`.
    Turn {
        /// Board before the move.
        board: &'a Board,
        /// Actor to move.
        name: &'a str,
        /// Mark to play.
        mark: Mark,
        /// Whether the actor is automated.
        automated: bool,
    },
    /// A move was applied.
    Moved {
        /// Actor that moved.
        name: &'a str,
        /// Position played.
        position: usize,
        /// Whether the actor is automated.
        automated: bool,
    },
    /// The match reached a terminal state.
    Finished(&'a MatchReport),
}

/// Receives [`MatchEvent`]s for display.
pub trait MatchObserver {
    /// Handles one event.
    fn on_event(&mut self, event: &MatchEvent<'_>);
}

impl MatchObserver for () {
    fn on_event(&mut self, _event: &MatchEvent<'_>) {}
}

/// Receives every finished match exactly once.
pub trait MatchRecorder {
    /// Records the outcome of `report`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the outcome could not be persisted.
    fn record_match(&mut self, report: &MatchReport) -> Result<(), StoreError>;
}

/// Failure to complete a match.
#[derive(Debug, Display, From)]
pub enum EngineError {
    /// An actor could not produce a move. Nothing was recorded.
    #[display("{}", _0)]
    Actor(ActorError),
    /// The match finished but its outcome could not be persisted.
    #[display("{}", _0)]
    Store(StoreError),
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Actor(e) => Some(e),
            EngineError::Store(e) => Some(e),
        }
    }
}

/// Plays one match between participant A (`X`) and participant B (`O`).
pub struct MatchEngine {
    settings: MatchSettings,
    side_a: Box<dyn Actor>,
    side_b: Box<dyn Actor>,
}

impl MatchEngine {
    /// Creates an engine for one match.
    pub fn new(settings: MatchSettings, side_a: Box<dyn Actor>, side_b: Box<dyn Actor>) -> Self {
        Self {
            settings,
            side_a,
            side_b,
        }
    }

    /// The match settings.
    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    fn actor_mut(&mut self, side: Side) -> &mut dyn Actor {
        match side {
            Side::A => self.side_a.as_mut(),
            Side::B => self.side_b.as_mut(),
        }
    }

    /// Runs the match to completion and hands the outcome to `recorder`.
    ///
    /// A position the board refuses is asked for again without changing
    /// turns.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Actor`] if an actor fails, in which case the
    /// match is abandoned unrecorded, or [`EngineError::Store`] if the
    /// recorder fails after the match finished.
    #[instrument(
        skip_all,
        fields(size = %self.settings.size, mode = %self.settings.mode, first = ?self.settings.first)
    )]
    pub fn play(
        &mut self,
        observer: &mut dyn MatchObserver,
        recorder: &mut dyn MatchRecorder,
    ) -> Result<MatchReport, EngineError> {
        let settings = self.settings;
        info!("Match started");
        observer.on_event(&MatchEvent::Started(&settings));

        let mut game = MatchSetup::new(settings.size).start(settings.first.mark());

        let finished = loop {
            let mark = game.to_move();
            let actor = self.actor_mut(Side::from_mark(mark));
            let automated = actor.is_automated();

            observer.on_event(&MatchEvent::Turn {
                board: game.board(),
                name: actor.name(),
                mark,
                automated,
            });

            let position = actor.get_move(game.board(), mark)?;
            let moved = MatchEvent::Moved {
                name: actor.name(),
                position,
                automated,
            };

            match game.make_move(Move::new(mark, position)) {
                Ok(MatchResult::InProgress(next)) => {
                    observer.on_event(&moved);
                    game = next;
                }
                Ok(MatchResult::Finished(done)) => {
                    observer.on_event(&moved);
                    break done;
                }
                Err(rejected) => {
                    warn!(error = %rejected.error, position, "Actor chose an unplayable position");
                    game = rejected.game;
                }
            }
        };

        let report = MatchReport {
            settings,
            outcome: finished.outcome(),
            board: finished.board().clone(),
            moves: finished.history().to_vec(),
        };
        info!(outcome = %report.outcome, moves = report.moves.len(), "Match finished");
        observer.on_event(&MatchEvent::Finished(&report));

        recorder.record_match(&report)?;
        debug!("Match recorded");
        Ok(report)
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("settings", &self.settings)
            .field("side_a", &self.side_a.name())
            .field("side_b", &self.side_b.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Script(Vec<usize>);

    impl Actor for Script {
        fn get_move(&mut self, _board: &Board, _mark: Mark) -> Result<usize, ActorError> {
            if self.0.is_empty() {
                Err(ActorError::InputClosed)
            } else {
                Ok(self.0.remove(0))
            }
        }

        fn name(&self) -> &str {
            "script"
        }
    }

    #[derive(Default)]
    struct Count(usize);

    impl MatchRecorder for Count {
        fn record_match(&mut self, _report: &MatchReport) -> Result<(), StoreError> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn test_unplayable_position_is_retried() {
        let settings = MatchSettings::new(BoardSize::Three, GameMode::Pvp, Side::A);
        let mut engine = MatchEngine::new(
            settings,
            Box::new(Script(vec![1, 1, 4, 7])),
            Box::new(Script(vec![2, 3])),
        );

        let mut recorder = Count::default();
        let report = engine.play(&mut (), &mut recorder).unwrap();
        assert_eq!(report.outcome(), &Outcome::Winner(Mark::X));
        assert_eq!(report.moves().len(), 5);
        assert_eq!(recorder.0, 1);
    }

    #[test]
    fn test_actor_failure_records_nothing() {
        let settings = MatchSettings::new(BoardSize::Three, GameMode::Pvp, Side::B);
        let mut engine = MatchEngine::new(
            settings,
            Box::new(Script(vec![])),
            Box::new(Script(vec![5])),
        );

        let mut recorder = Count::default();
        let err = engine.play(&mut (), &mut recorder).unwrap_err();
        assert!(matches!(err, EngineError::Actor(ActorError::InputClosed)));
        assert_eq!(recorder.0, 0);
    }
}
