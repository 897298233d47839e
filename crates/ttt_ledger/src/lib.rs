//! Console tic-tac-toe with persisted statistics and match history.
//!
//! # Architecture
//!
//! - **Actors**: interactive and automated move sources
//! - **Engine**: drives a [`ttt_board`] match between two actors
//! - **Ledger**: per-slot counters and the match history, both kept in one
//!   text file that is only ever replaced atomically
//! - **Session**: the menu loop tying them to a console
//!
//! # Example
//!
//! ```no_run
//! use ttt_ledger::{BackingStore, Ledger, Slot};
//!
//! let ledger = Ledger::with_system_clock(BackingStore::new("game_data.txt"));
//! println!("Host has won {} matches", ledger.stats().get(Slot::Host).wins());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod actors;
mod config;
mod console;
mod engine;
mod error;
mod history;
mod ledger;
mod participants;
mod session;
mod stats;
mod store;

// Crate-level exports - Actors
pub use actors::{Actor, ActorError, BotActor, Entry, HumanActor, InputSource};

// Crate-level exports - Configuration and errors
pub use config::LedgerConfig;
pub use error::{ConfigError, StoreError};

// Crate-level exports - Console and session
pub use console::{Console, ConsoleView};
pub use session::{ConsoleSession, Flow, Setup};

// Crate-level exports - Match engine
pub use engine::{
    EngineError, MatchEngine, MatchEvent, MatchObserver, MatchRecorder, MatchReport,
    MatchSettings,
};

// Crate-level exports - Persistence
pub use history::{
    BLOCK_SEPARATOR, Clock, DRAW_LABEL, FixedClock, HISTORY_HEADER, History, HistoryBlock,
    HistoryLog, MatchRecord, SystemClock, TIMESTAMP_FORMAT, split_blocks,
};
pub use ledger::Ledger;
pub use stats::{STATS_HEADER, SlotStats, StatsTable};
pub use store::{BackingStore, StoreContents};

// Crate-level exports - Participants
pub use participants::{GameMode, Side, Slot};
