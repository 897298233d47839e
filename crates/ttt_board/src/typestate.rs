//! Phase-specific match types.
//!
//! Each phase is its own type: only [`MatchInProgress`] accepts moves, and
//! a [`MatchFinished`] always carries an [`Outcome`].

use crate::action::{Move, MoveError};
use crate::phases::Outcome;
use crate::{Board, BoardSize, Mark};
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Match in setup: the board is initialized and empty.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    board: Board,
}

impl MatchSetup {
    /// Creates a match with a freshly labelled board.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self {
            board: Board::new(size),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the match with the given mark to move first.
    #[instrument(skip(self))]
    pub fn start(self, first: Mark) -> MatchInProgress {
        MatchInProgress {
            board: self.board,
            history: Vec::new(),
            to_move: first,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Match in progress: accepts moves from the side to move.
#[derive(Debug, Clone)]
pub struct MatchInProgress {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Mark,
}

/// A move that could not be applied, handing the untouched match back.
#[derive(Debug)]
pub struct MoveRejected {
    /// The match exactly as it was before the move.
    pub game: MatchInProgress,
    /// Why the move was refused.
    pub error: MoveError,
}

impl std::fmt::Display for MoveRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for MoveRejected {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl MatchInProgress {
    /// Applies a move, consuming the match and returning the next phase.
    ///
    /// The placed mark is checked for a completed line first; only then is
    /// a full board reported as a draw.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejected`] carrying the unchanged match when the mark
    /// is not the one to move or the position is out of range or taken.
    #[instrument(skip(self), fields(to_move = %self.to_move, moves = self.board.moves()))]
    pub fn make_move(mut self, action: Move) -> Result<MatchResult, MoveRejected> {
        if action.mark != self.to_move {
            return Err(MoveRejected {
                error: MoveError::WrongMark(action.mark),
                game: self,
            });
        }

        if let Err(error) = self.board.apply_move(action.position, action.mark) {
            debug!(%error, "Move rejected");
            return Err(MoveRejected { game: self, error });
        }
        self.history.push(action);

        #[cfg(debug_assertions)]
        {
            use crate::invariants::{BoardInvariants, InvariantSet};
            if let Err(violations) = BoardInvariants::check_all(&self) {
                let descriptions = violations
                    .iter()
                    .map(|v| v.description.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::error!(%descriptions, "Board invariant violated");
            }
        }

        if self.board.detect_winner(action.mark) {
            debug!(winner = %action.mark, "Line completed");
            return Ok(MatchResult::Finished(MatchFinished {
                board: self.board,
                history: self.history,
                outcome: Outcome::Winner(action.mark),
            }));
        }

        if self.board.is_full() {
            debug!("Board full without a line");
            return Ok(MatchResult::Finished(MatchFinished {
                board: self.board,
                history: self.history,
                outcome: Outcome::Draw,
            }));
        }

        self.to_move = self.to_move.opponent();
        Ok(MatchResult::InProgress(self))
    }

    /// Returns the mark to move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns open positions.
    pub fn valid_moves(&self) -> Vec<usize> {
        self.board.open_positions()
    }

    /// Replays moves from a fresh board.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoveError`] hit, or [`MoveError::GameOver`] if
    /// moves remain after the match finished.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(size: BoardSize, first: Mark, moves: &[Move]) -> Result<MatchResult, MoveError> {
        let mut result = MatchResult::InProgress(MatchSetup::new(size).start(first));

        for action in moves {
            result = match result {
                MatchResult::InProgress(game) => {
                    game.make_move(*action).map_err(|rejected| rejected.error)?
                }
                MatchResult::Finished(_) => return Err(MoveError::GameOver),
            };
        }

        Ok(result)
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Match finished: outcome determined.
#[derive(Debug, Clone)]
pub struct MatchFinished {
    board: Board,
    history: Vec<Move>,
    outcome: Outcome,
}

impl MatchFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the final board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Starts over on a fresh board of the same size.
    #[instrument(skip(self))]
    pub fn restart(self) -> MatchSetup {
        MatchSetup::new(self.board.size())
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum MatchResult {
    /// Match continues.
    InProgress(MatchInProgress),
    /// Match finished.
    Finished(MatchFinished),
}

impl MatchResult {
    /// Returns the in-progress match, if the match continues.
    pub fn into_in_progress(self) -> Option<MatchInProgress> {
        match self {
            MatchResult::InProgress(game) => Some(game),
            MatchResult::Finished(_) => None,
        }
    }

    /// Returns the finished match, if the match ended.
    pub fn into_finished(self) -> Option<MatchFinished> {
        match self {
            MatchResult::InProgress(_) => None,
            MatchResult::Finished(game) => Some(game),
        }
    }
}
