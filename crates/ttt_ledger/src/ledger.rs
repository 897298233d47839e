//! Statistics table and history log bound to one backing store.

use crate::engine::{MatchRecorder, MatchReport};
use crate::history::{Clock, HistoryLog, MatchRecord, SystemClock};
use crate::stats::StatsTable;
use crate::store::BackingStore;
use crate::StoreError;
use tracing::{info, instrument, warn};

/// In-memory counters plus the store they persist to.
///
/// The table is loaded once when the ledger is opened and written back
/// after every recorded match.
#[derive(Debug)]
pub struct Ledger<C = SystemClock> {
    store: BackingStore,
    history: HistoryLog,
    stats: StatsTable,
    clock: C,
}

impl Ledger<SystemClock> {
    /// Opens the store at `store` using the wall clock.
    pub fn with_system_clock(store: BackingStore) -> Self {
        Self::open(store, SystemClock)
    }
}

impl<C: Clock> Ledger<C> {
    /// Opens `store`, loading counters or zeroing them if absent.
    #[instrument(skip(store, clock), fields(path = %store.path().display()))]
    pub fn open(store: BackingStore, clock: C) -> Self {
        let stats = StatsTable::load(&store);
        Self {
            history: HistoryLog::new(store.clone()),
            store,
            stats,
            clock,
        }
    }

    /// Current counters.
    pub fn stats(&self) -> &StatsTable {
        &self.stats
    }

    /// The backing store.
    pub fn store(&self) -> &BackingStore {
        &self.store
    }

    /// The history log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Writes the current counters to the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be rewritten.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.stats.persist(&self.store)
    }
}

impl<C: Clock> MatchRecorder for Ledger<C> {
    /// Appends the history block, then counts and persists the outcome.
    ///
    /// The counters are updated in memory even if a write fails; the first
    /// failure is returned.
    #[instrument(skip_all, fields(mode = %report.settings().mode(), winner = ?report.winner_slot()))]
    fn record_match(&mut self, report: &MatchReport) -> Result<(), StoreError> {
        let settings = report.settings();
        let record = MatchRecord::new(
            *settings.mode(),
            *settings.size(),
            report.winner_side(),
            self.clock.now(),
        );

        let appended = self.history.append(&record);
        if let Err(e) = &appended {
            warn!(error = %e, "History append failed");
        }

        self.stats
            .record_outcome(*settings.mode(), report.winner_side());
        let persisted = self.persist();
        if let Err(e) = &persisted {
            warn!(error = %e, "Statistics write failed");
        }

        appended.and(persisted)?;
        info!("Match recorded");
        Ok(())
    }
}
