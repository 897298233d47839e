//! Append-only match history kept below the statistics table.

use crate::participants::{GameMode, Side};
use crate::store::BackingStore;
use crate::StoreError;
use chrono::{Local, NaiveDateTime};
use derive_getters::Getters;
use tracing::{debug, instrument};
use ttt_board::BoardSize;

/// First line of the history section.
pub const HISTORY_HEADER: &str = "=== MATCH HISTORY ===";

/// Line closing every history block.
pub const BLOCK_SEPARATOR: &str = "=====================================";

/// Winner label written for a drawn match.
pub const DRAW_LABEL: &str = "Draw";

/// `ctime`-style timestamp, e.g. `Fri Oct 16 14:03:07 2026`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

// ─────────────────────────────────────────────────────────────
//  Clock
// ─────────────────────────────────────────────────────────────

/// Source of match timestamps.
pub trait Clock {
    /// Current local time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

// ─────────────────────────────────────────────────────────────
//  Records
// ─────────────────────────────────────────────────────────────

/// One completed match, as it is written to the history section.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MatchRecord {
    timestamp: String,
    board_size: BoardSize,
    mode: GameMode,
    player_one: String,
    player_two: String,
    winner: String,
}

impl MatchRecord {
    /// Builds the record for a match of `mode` that ended at `at`.
    ///
    /// `winner` is `None` for a draw.
    pub fn new(
        mode: GameMode,
        board_size: BoardSize,
        winner: Option<Side>,
        at: NaiveDateTime,
    ) -> Self {
        let [a, b] = mode.participants();
        let winner = match winner {
            Some(side) => mode.slot(side).name().to_string(),
            None => DRAW_LABEL.to_string(),
        };
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            board_size,
            mode,
            player_one: a.name().to_string(),
            player_two: b.name().to_string(),
            winner,
        }
    }

    /// Whether the match was drawn.
    pub fn is_draw(&self) -> bool {
        self.winner == DRAW_LABEL
    }

    /// The block text: six lines and the separator, each newline-terminated.
    pub fn to_block(&self) -> String {
        format!(
            "Date & Time: {}\nBoard Size: {}\nGame Mode: {}\nPlayer 1: {} (X)\nPlayer 2: {} (O)\nWinner: {}\n{}\n",
            self.timestamp,
            self.board_size,
            self.mode.label(),
            self.player_one,
            self.player_two,
            self.winner,
            BLOCK_SEPARATOR
        )
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_block())
    }
}

/// One raw history block exactly as stored, separator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBlock(String);

impl HistoryBlock {
    /// Wraps raw block text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The block text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the block back into a record, if it is well formed.
    pub fn to_record(&self) -> Option<MatchRecord> {
        let mut lines = self.0.lines();
        let mut field = |label: &str| {
            lines
                .next()
                .and_then(|line| line.strip_prefix(label))
                .map(str::to_string)
        };

        let timestamp = field("Date & Time: ")?;
        let size = field("Board Size: ")?;
        let mode = field("Game Mode: ")?;
        let player_one = field("Player 1: ")?;
        let player_two = field("Player 2: ")?;
        let winner = field("Winner: ")?;

        let dimension = size.split_once('x')?.0.parse::<usize>().ok()?;
        Some(MatchRecord {
            timestamp,
            board_size: BoardSize::try_from(dimension).ok()?,
            mode: GameMode::from_label(&mode)?,
            player_one: player_one.strip_suffix(" (X)")?.to_string(),
            player_two: player_two.strip_suffix(" (O)")?.to_string(),
            winner,
        })
    }
}

impl std::fmt::Display for HistoryBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the store holds in its history section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum History {
    /// There is no store file.
    NoStore,
    /// The store exists but has no history header.
    NoSection,
    /// Blocks in append order. May be empty.
    Blocks(Vec<HistoryBlock>),
}

impl History {
    /// Blocks in append order, empty unless a section exists.
    pub fn blocks(&self) -> &[HistoryBlock] {
        match self {
            History::Blocks(blocks) => blocks,
            History::NoStore | History::NoSection => &[],
        }
    }
}

/// Splits the text following the history header into blocks.
///
/// A block ends at its separator line. Trailing text without a separator
/// is kept as a final block.
pub fn split_blocks(section: &str) -> Vec<HistoryBlock> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in section.split_inclusive('\n') {
        if current.is_empty() && line.trim().is_empty() {
            continue;
        }
        current.push_str(line);
        if line.trim_end() == BLOCK_SEPARATOR {
            blocks.push(HistoryBlock(std::mem::take(&mut current)));
        }
    }

    if !current.trim().is_empty() {
        blocks.push(HistoryBlock(current));
    }
    blocks
}

// ─────────────────────────────────────────────────────────────
//  Log
// ─────────────────────────────────────────────────────────────

/// The history section of a [`BackingStore`].
#[derive(Debug, Clone)]
pub struct HistoryLog {
    store: BackingStore,
}

impl HistoryLog {
    /// History kept in `store`.
    pub fn new(store: BackingStore) -> Self {
        Self { store }
    }

    /// Appends one block after every existing block.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or replaced.
    pub fn append(&self, record: &MatchRecord) -> Result<(), StoreError> {
        self.store.append_history(record)
    }

    /// Reads every block in append order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store exists but cannot be read.
    #[instrument(skip(self), fields(path = %self.store.path().display()))]
    pub fn read_all(&self) -> Result<History, StoreError> {
        let Some(contents) = self.store.load_all()? else {
            return Ok(History::NoStore);
        };
        let Some(section) = contents.history_text() else {
            return Ok(History::NoSection);
        };

        let body = section
            .split_once('\n')
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        let blocks = split_blocks(body);
        debug!(count = blocks.len(), "History read");
        Ok(History::Blocks(blocks))
    }
}
