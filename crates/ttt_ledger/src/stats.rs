//! Per-slot win/loss/draw counters and their persisted table.

use crate::participants::{GameMode, Side, Slot};
use crate::store::BackingStore;
use crate::StoreError;
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// First line of the statistics section.
pub const STATS_HEADER: &str = "=== GAME STATISTICS ===";

const RULE_WIDTH: usize = 56;

/// Counters for one participant slot.
///
/// `matches` always equals `wins + losses + draws`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct SlotStats {
    slot: Slot,
    matches: u32,
    wins: u32,
    losses: u32,
    draws: u32,
}

impl SlotStats {
    /// Counters for a slot that has never played.
    pub fn zeroed(slot: Slot) -> Self {
        Self {
            slot,
            matches: 0,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Name of the slot.
    pub fn name(&self) -> &'static str {
        self.slot.name()
    }

    /// Wins as a percentage of matches, `0.0` before the first match.
    pub fn win_rate(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            (self.wins as f64 / self.matches as f64) * 100.0
        }
    }

    fn record_win(&mut self) -> bool {
        bump(&mut self.matches, &mut self.wins)
    }

    fn record_loss(&mut self) -> bool {
        bump(&mut self.matches, &mut self.losses)
    }

    fn record_draw(&mut self) -> bool {
        bump(&mut self.matches, &mut self.draws)
    }

    /// Fixed-width row as written to the store.
    pub fn row(&self) -> String {
        format!(
            "{:<10} {:<8} {:<6} {:<8} {:<7} {:.1}%",
            self.name(),
            self.matches,
            self.wins,
            self.losses,
            self.draws,
            self.win_rate()
        )
    }

    /// Parses a persisted row for `slot`.
    ///
    /// Rows are positional: the name column is not matched against the
    /// slot. Returns `None` when a counter is missing or not a number, or
    /// when the counters do not add up.
    pub fn parse_row(slot: Slot, line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        fields.next()?;

        let mut next = || fields.next()?.parse::<u32>().ok();
        let stats = Self {
            slot,
            matches: next()?,
            wins: next()?,
            losses: next()?,
            draws: next()?,
        };

        let total = stats
            .wins
            .checked_add(stats.losses)?
            .checked_add(stats.draws)?;
        (total == stats.matches).then_some(stats)
    }
}

/// Adds one to `matches` and `counter`. Both stay unchanged when either
/// is already at `u32::MAX`.
fn bump(matches: &mut u32, counter: &mut u32) -> bool {
    let (Some(m), Some(c)) = (matches.checked_add(1), counter.checked_add(1)) else {
        return false;
    };
    *matches = m;
    *counter = c;
    true
}

fn warn_saturated(slot: Slot, counted: bool) {
    if !counted {
        warn!(%slot, "Counter at maximum, slot left unchanged");
    }
}

/// Counters for all four slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsTable {
    rows: [SlotStats; 4],
}

impl Default for StatsTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTable {
    /// Table with every slot zeroed.
    pub fn new() -> Self {
        Self {
            rows: Slot::ALL.map(SlotStats::zeroed),
        }
    }

    /// Counters for `slot`.
    pub fn get(&self, slot: Slot) -> &SlotStats {
        &self.rows[slot.index()]
    }

    /// All rows in persisted order.
    pub fn rows(&self) -> &[SlotStats; 4] {
        &self.rows
    }

    /// Counts one completed match for both participants of `mode`.
    ///
    /// `winner` is `None` for a draw.
    #[instrument(skip(self))]
    pub fn record_outcome(&mut self, mode: GameMode, winner: Option<Side>) {
        let [a, b] = mode.participants();
        match winner {
            Some(side) => {
                let (won, lost) = match side {
                    Side::A => (a, b),
                    Side::B => (b, a),
                };
                warn_saturated(won, self.rows[won.index()].record_win());
                warn_saturated(lost, self.rows[lost.index()].record_loss());
                info!(winner = %won, loser = %lost, "Outcome recorded");
            }
            None => {
                warn_saturated(a, self.rows[a.index()].record_draw());
                warn_saturated(b, self.rows[b.index()].record_draw());
                info!(%a, %b, "Draw recorded");
            }
        }
    }

    /// Header, column titles, rule and one row per slot, newline-terminated.
    pub fn render(&self) -> String {
        let mut text = String::new();
        text.push_str(STATS_HEADER);
        text.push('\n');
        text.push_str(&format!(
            "{:<10} {:<8} {:<6} {:<8} {:<7} {:<8}\n",
            "Player", "Matches", "Wins", "Losses", "Draws", "Win Rate"
        ));
        text.push_str(&"-".repeat(RULE_WIDTH));
        text.push('\n');
        for row in &self.rows {
            text.push_str(&row.row());
            text.push('\n');
        }
        text
    }

    /// Rebuilds the table from a statistics section.
    ///
    /// The four rows follow the header, column titles and rule. A missing
    /// or malformed row zeroes only its own slot.
    #[instrument(skip(section))]
    pub fn parse_section(section: &str) -> Self {
        let mut lines = section.lines();
        if !lines.any(|line| line.contains(STATS_HEADER)) {
            warn!("Statistics header not found, starting from zero");
            return Self::new();
        }

        let body: Vec<&str> = lines.skip(2).take(Slot::ALL.len()).collect();
        let rows = Slot::ALL.map(|slot| {
            body.get(slot.index())
                .filter(|line| !line.trim().is_empty() && !line.contains("==="))
                .and_then(|line| SlotStats::parse_row(slot, line))
                .unwrap_or_else(|| {
                    warn!(%slot, "Statistics row missing or malformed, zeroing slot");
                    SlotStats::zeroed(slot)
                })
        });

        Self { rows }
    }

    /// Loads counters from the store. Never fails: an absent or unreadable
    /// store yields a zeroed table.
    #[instrument(skip(store), fields(path = %store.path().display()))]
    pub fn load(store: &BackingStore) -> Self {
        match store.load_all() {
            Ok(Some(contents)) => {
                let table = Self::parse_section(contents.statistics());
                debug!("Statistics loaded");
                table
            }
            Ok(None) => {
                info!("No store yet, statistics start at zero");
                Self::new()
            }
            Err(e) => {
                warn!(error = %e, "Unable to read store, statistics start at zero");
                Self::new()
            }
        }
    }

    /// Rewrites the statistics section of the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be rewritten.
    pub fn persist(&self, store: &BackingStore) -> Result<(), StoreError> {
        store.replace_statistics(self)
    }
}

impl std::fmt::Display for StatsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
