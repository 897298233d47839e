//! Command-line interface for ttt_ledger.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ttt_ledger::{GameMode, Side};

/// Tic-tac-toe with persisted statistics and match history
#[derive(Parser, Debug)]
#[command(name = "ttt_ledger")]
#[command(about = "Console tic-tac-toe with persisted statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (ignored if missing)
    #[arg(short, long, default_value = "ttt_ledger.toml")]
    pub config: PathBuf,

    /// Statistics and history file, overriding the config
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Subcommand to run (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive menu
    Menu,

    /// Play a single match and record it
    Play {
        /// Board dimension
        #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u8).range(3..=4))]
        size: u8,

        /// Who plays whom
        #[arg(short, long, value_enum, default_value_t = ModeArg::Pvp)]
        mode: ModeArg,

        /// Participant moving first
        #[arg(short, long, value_enum, default_value_t = FirstArg::A)]
        first: FirstArg,
    },

    /// Print the statistics table
    Stats,

    /// Print the match history
    History,

    /// Print the raw data file
    Dump,
}

/// Game mode argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Host vs Guest
    Pvp,
    /// Player vs Bot
    Pve,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pvp => GameMode::Pvp,
            ModeArg::Pve => GameMode::Pve,
        }
    }
}

/// First player argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstArg {
    /// Participant A (X)
    A,
    /// Participant B (O)
    B,
}

impl From<FirstArg> for Side {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::A => Side::A,
            FirstArg::B => Side::B,
        }
    }
}
