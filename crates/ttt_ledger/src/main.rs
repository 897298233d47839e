//! ttt_ledger - console tic-tac-toe
//!
//! Plays matches on the terminal and keeps per-slot statistics and a match
//! history in one text file.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ttt_board::BoardSize;
use ttt_ledger::{
    BackingStore, Console, ConsoleSession, Ledger, LedgerConfig, MatchSettings, SystemClock,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = LedgerConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(data_file) = cli.data_file {
        config = config.with_data_file(data_file);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "Configuration resolved");
    let store = BackingStore::new(config.data_file().clone());
    let ledger = Ledger::open(store, SystemClock);
    let mut session = ConsoleSession::new(Console::stdio(), ledger, config);

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => session.run_menu()?,
        Command::Play { size, mode, first } => {
            let size = BoardSize::try_from(usize::from(size))?;
            let settings = MatchSettings::new(size, mode.into(), first.into());
            info!(?settings, "Playing single match");
            session.play_match(settings)?;
        }
        Command::Stats => {
            session.show_stats()?;
        }
        Command::History => {
            session.show_history()?;
        }
        Command::Dump => {
            session.dump()?;
        }
    }

    Ok(())
}
