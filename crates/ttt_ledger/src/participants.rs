//! Game modes, participant slots and sides.

use serde::{Deserialize, Serialize};
use ttt_board::Mark;

/// One of the four fixed identities whose results are tracked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Slot {
    /// Player-vs-player, participant A.
    Host,
    /// Player-vs-player, participant B.
    Guest,
    /// Player-vs-bot, participant A.
    Player,
    /// Player-vs-bot, participant B.
    Bot,
}

impl Slot {
    /// All slots in persisted row order.
    pub const ALL: [Slot; 4] = [Slot::Host, Slot::Guest, Slot::Player, Slot::Bot];

    /// Row index in the statistics table.
    pub fn index(self) -> usize {
        match self {
            Slot::Host => 0,
            Slot::Guest => 1,
            Slot::Player => 2,
            Slot::Bot => 3,
        }
    }

    /// Display name written to the store.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Host => "Host",
            Slot::Guest => "Guest",
            Slot::Player => "Player",
            Slot::Bot => "Bot",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Side of a match. Participant A always plays `X`, B always plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Participant A, playing `X`.
    #[default]
    A,
    /// Participant B, playing `O`.
    B,
}

impl Side {
    /// Mark played by this side.
    pub fn mark(self) -> Mark {
        match self {
            Side::A => Mark::X,
            Side::B => Mark::O,
        }
    }

    /// Side playing the given mark.
    pub fn from_mark(mark: Mark) -> Self {
        match mark {
            Mark::X => Side::A,
            Mark::O => Side::B,
        }
    }
}

/// Who plays whom.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumIter,
)]
pub enum GameMode {
    /// Host vs Guest, both interactive.
    #[default]
    Pvp,
    /// Player vs Bot.
    Pve,
}

impl GameMode {
    /// Label written to match history.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Pvp => "PVP",
            GameMode::Pve => "PVE",
        }
    }

    /// Parses a history label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "PVP" => Some(GameMode::Pvp),
            "PVE" => Some(GameMode::Pve),
            _ => None,
        }
    }

    /// Slots for participant A and B.
    pub fn participants(self) -> [Slot; 2] {
        match self {
            GameMode::Pvp => [Slot::Host, Slot::Guest],
            GameMode::Pve => [Slot::Player, Slot::Bot],
        }
    }

    /// Slot occupying `side` in this mode.
    pub fn slot(self, side: Side) -> Slot {
        let [a, b] = self.participants();
        match side {
            Side::A => a,
            Side::B => b,
        }
    }

    /// Whether participant B is the automated actor.
    pub fn has_bot(self) -> bool {
        matches!(self, GameMode::Pve)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
