//! Tests for the interactive menu session.

use std::io::Cursor;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use ttt_ledger::{
    BackingStore, Console, ConsoleSession, FixedClock, HistoryLog, Ledger, LedgerConfig, Slot,
    StatsTable,
};

type TestSession = ConsoleSession<Cursor<&'static str>, Vec<u8>, FixedClock>;

/// Session reading `input`, storing data in a fresh temporary directory.
fn setup_session(input: &'static str) -> (TempDir, BackingStore, TestSession) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (store, session) = session_at(dir.path().join("game_data.txt"), input);
    (dir, store, session)
}

/// Session reading `input` with its data file at `path`.
fn session_at(path: PathBuf, input: &'static str) -> (BackingStore, TestSession) {
    let config = LedgerConfig::default()
        .with_data_file(path.clone())
        .with_bot_think_ms(0)
        .with_bot_seed(Some(7));

    let clock = NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|d| d.and_hms_opt(14, 3, 7))
        .map(FixedClock)
        .expect("Valid timestamp");
    let store = BackingStore::new(path);
    let ledger = Ledger::open(store.clone(), clock);
    let session = ConsoleSession::new(Console::new(Cursor::new(input), Vec::new()), ledger, config);
    (store, session)
}

fn output(session: &TestSession) -> String {
    String::from_utf8_lossy(session.console().borrow().writer()).into_owned()
}

#[test]
fn test_exit_saves_and_says_goodbye() {
    let (_dir, store, mut session) = setup_session("4\n");
    session.run_menu().expect("Menu failed");

    let out = output(&session);
    assert!(out.starts_with("=== TIC-TAC-TOE GAME ===\nWelcome to Tic-Tac-Toe!\n"));
    assert!(out.contains("1. Start New Game\n2. View Game Statistics\n3. View Match History\n4. Exit\n"));
    assert!(out.ends_with("Your progress has been successfully saved.\nGoodbye!\n"));
    assert!(!out.contains("Press Enter to continue..."));
    assert_eq!(StatsTable::load(&store), StatsTable::new());
    assert!(store.path().exists());
}

#[test]
fn test_exit_reports_failed_save() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let (store, mut session) = session_at(dir.path().join("missing").join("game_data.txt"), "4\n");
    session.run_menu().expect("Menu failed");

    let out = output(&session);
    assert!(out.contains("Error: Unable to save statistics!\n"));
    assert!(!out.contains("Your progress has been successfully saved."));
    assert!(out.ends_with("Goodbye!\n"));
    assert!(!store.path().exists());
}

#[test]
fn test_end_of_input_behaves_like_exit() {
    let (_dir, _store, mut session) = setup_session("");
    session.run_menu().expect("Menu failed");
    assert!(output(&session).ends_with("Goodbye!\n"));
}

#[test]
fn test_invalid_choice_reprompts() {
    let (_dir, _store, mut session) = setup_session("9\n\nabc\n\n4\n");
    session.run_menu().expect("Menu failed");

    let out = output(&session);
    assert_eq!(out.matches("Invalid choice! Please try again.").count(), 2);
    assert_eq!(out.matches("Press Enter to continue...").count(), 2);
    assert!(out.ends_with("Goodbye!\n"));
}

#[test]
fn test_full_match_then_views() {
    let (_dir, store, mut session) =
        setup_session("1\n3\n1\n1\n1\n2\n4\n5\n7\n\n2\n\n3\n\n4\n");
    session.run_menu().expect("Menu failed");

    let out = output(&session);
    assert!(out.contains("Select Board Size:"));
    assert!(out.contains("Who goes first?\n1. Host (X)\n2. Guest (O)\n"));
    assert!(out.contains("Congratulations! Host wins!"));
    assert!(out.contains("Host       1        1      0        0       100.0%"));
    assert!(out.contains("Guest      1        0      1        0       0.0%"));
    assert!(out.contains("=== MATCH HISTORY ===\nDate & Time: Fri Oct 16 14:03:07 2026\n"));
    assert!(out.contains("Winner: Host\n"));

    let loaded = StatsTable::load(&store);
    assert_eq!(*loaded.get(Slot::Host).wins(), 1);
    assert_eq!(*loaded.get(Slot::Guest).losses(), 1);
}

#[test]
fn test_invalid_board_size_returns_to_menu() {
    let (_dir, store, mut session) = setup_session("1\n5\n\n4\n");
    session.run_menu().expect("Menu failed");

    let out = output(&session);
    assert!(out.contains("Invalid size! Please choose between 3 and 4."));
    assert!(!out.contains("Select Game Mode:"));
    assert_eq!(StatsTable::load(&store), StatsTable::new());
}

#[test]
fn test_invalid_mode_returns_to_menu() {
    let (_dir, _store, mut session) = setup_session("1\n4\n3\n\n4\n");
    session.run_menu().expect("Menu failed");

    let out = output(&session);
    assert!(out.contains("Select Game Mode:"));
    assert!(out.contains("Invalid choice!\n"));
    assert!(!out.contains("Who goes first?"));
}

#[test]
fn test_pve_match_against_seeded_bot() {
    let (_dir, store, mut session) =
        setup_session("1\n3\n2\n1\n1\n2\n3\n4\n5\n6\n7\n8\n9\n");
    session.run_menu().expect("Menu failed");

    let out = output(&session);
    assert!(out.contains("Mode: PVE - Player (X) vs Bot (O)"));
    assert!(out.contains("Bot is thinking..."));
    assert!(out.contains("Bot chose position"));

    let loaded = StatsTable::load(&store);
    for slot in [Slot::Player, Slot::Bot] {
        assert_eq!(*loaded.get(slot).matches(), 1);
    }
    assert_eq!(*loaded.get(Slot::Host).matches(), 0);
}

#[test]
fn test_history_view_without_store() {
    let (_dir, _store, mut session) = setup_session("3\n\n4\n");
    session.run_menu().expect("Menu failed");
    assert!(output(&session).contains("No match history found!"));
}

#[test]
fn test_history_view_without_section() {
    let (_dir, store, mut session) = setup_session("");
    std::fs::write(store.path(), StatsTable::new().render()).expect("Write failed");

    session.show_history().expect("View failed");
    let out = output(&session);
    assert!(out.contains("=== MATCH HISTORY ===\nNo match history available yet!\n"));
}

#[test]
fn test_dump_prints_store() {
    let (_dir, store, mut session) = setup_session("");
    session.dump().expect("Dump failed");
    assert!(output(&session).contains("No game data found!"));

    StatsTable::new().persist(&store).expect("Persist failed");
    session.dump().expect("Dump failed");
    assert!(output(&session).contains("=== GAME STATISTICS ===\n"));
}

#[test]
fn test_views_tolerate_invalid_utf8() {
    let (_dir, store, mut session) = setup_session("");
    let mut bytes = StatsTable::new().render().into_bytes();
    bytes.extend_from_slice(b"\n=== MATCH HISTORY ===\nDate & Time: \xff\n");
    std::fs::write(store.path(), &bytes).expect("Write failed");

    session.dump().expect("Dump failed");
    session.show_history().expect("View failed");

    let out = output(&session);
    assert!(!out.contains("No game data found!"));
    assert!(!out.contains("No match history found!"));
    assert!(out.contains("Date & Time: \u{FFFD}\n"));
}

#[test]
fn test_input_closed_mid_match_quits() {
    let (_dir, store, mut session) = setup_session("1\n3\n1\n1\n5\n");
    session.run_menu().expect("Menu failed");

    let out = output(&session);
    assert!(out.ends_with("Goodbye!\n"));
    assert_eq!(*session.ledger().stats().get(Slot::Host).matches(), 0);
    let history = HistoryLog::new(store).read_all().expect("Read failed");
    assert!(history.blocks().is_empty());
}
