//! Interactive console session: main menu, match setup and views.

use crate::actors::{Actor, ActorError, BotActor, Entry, HumanActor, InputSource};
use crate::config::LedgerConfig;
use crate::console::{Console, ConsoleView};
use crate::engine::{EngineError, MatchEngine, MatchReport, MatchSettings};
use crate::history::{Clock, History, HISTORY_HEADER};
use crate::ledger::Ledger;
use crate::participants::{GameMode, Side};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};
use ttt_board::BoardSize;

const MAIN_MENU: &str = "\n=== TIC-TAC-TOE MENU ===\n\
1. Start New Game\n\
2. View Game Statistics\n\
3. View Match History\n\
4. Exit\n";

const SAVE_FAILED: &str = "Error: Unable to save statistics!";

/// Whether the session keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Back to the main menu.
    Continue,
    /// Input ended; leave the menu.
    Quit,
}

/// Result of the match setup prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setup {
    /// All three choices were valid.
    Ready(MatchSettings),
    /// A choice was invalid; nothing is played.
    Rejected,
    /// Input ended during setup.
    Closed,
}

/// Menu-driven game session over a console.
pub struct ConsoleSession<R, W, C> {
    console: Rc<RefCell<Console<R, W>>>,
    ledger: Ledger<C>,
    config: LedgerConfig,
    matches_played: u64,
}

impl<R, W, C> ConsoleSession<R, W, C>
where
    R: BufRead + 'static,
    W: Write + 'static,
    C: Clock,
{
    /// Creates a session.
    pub fn new(console: Console<R, W>, ledger: Ledger<C>, config: LedgerConfig) -> Self {
        Self {
            console: console.shared(),
            ledger,
            config,
            matches_played: 0,
        }
    }

    /// The ledger.
    pub fn ledger(&self) -> &Ledger<C> {
        &self.ledger
    }

    /// The shared console.
    pub fn console(&self) -> &Rc<RefCell<Console<R, W>>> {
        &self.console
    }

    fn say(&self, text: &str) -> io::Result<()> {
        self.console.borrow_mut().say(text)
    }

    fn show(&self, message: &str) -> io::Result<()> {
        self.console.borrow_mut().show(message)
    }

    fn read_number(&self, prompt: &str) -> io::Result<Entry> {
        self.console.borrow_mut().read_number(prompt)
    }

    /// Runs the main menu until Exit is chosen or input ends.
    ///
    /// Counters are written one final time on the way out.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be read or written.
    #[instrument(skip(self))]
    pub fn run_menu(&mut self) -> io::Result<()> {
        self.say("=== TIC-TAC-TOE GAME ===\nWelcome to Tic-Tac-Toe!\n\n")?;

        loop {
            self.say(MAIN_MENU)?;
            let flow = match self.read_number("Enter your choice: ")? {
                Entry::Number(1) => self.new_game()?,
                Entry::Number(2) => self.show_stats()?,
                Entry::Number(3) => self.show_history()?,
                Entry::Number(4) | Entry::Closed => break,
                other => {
                    debug!(?other, "Invalid menu choice");
                    self.show("Invalid choice! Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
            if self.console.borrow_mut().prompt_line("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }

        self.exit()
    }

    fn exit(&mut self) -> io::Result<()> {
        match self.ledger.persist() {
            Ok(()) => self.show("Your progress has been successfully saved.")?,
            Err(e) => {
                warn!(error = %e, "Final save failed");
                self.show(SAVE_FAILED)?;
            }
        }
        self.show("Goodbye!")?;
        info!("Session ended");
        Ok(())
    }

    /// Prompts for board size, mode and first player, then plays.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be read or written.
    pub fn new_game(&mut self) -> io::Result<Flow> {
        match self.setup_match()? {
            Setup::Ready(settings) => self.play_match(settings),
            Setup::Rejected => Ok(Flow::Continue),
            Setup::Closed => Ok(Flow::Quit),
        }
    }

    /// Asks the three setup questions.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be read or written.
    #[instrument(skip(self))]
    pub fn setup_match(&mut self) -> io::Result<Setup> {
        self.say("\nSelect Board Size:\n3. Classic 3x3\n4. Standard 4x4\n")?;
        let size = match self.read_number("Enter board size (3-4): ")? {
            Entry::Number(n) => usize::try_from(n).ok().and_then(|n| BoardSize::try_from(n).ok()),
            Entry::Text(_) => None,
            Entry::Closed => return Ok(Setup::Closed),
        };
        let Some(size) = size else {
            self.show("Invalid size! Please choose between 3 and 4.")?;
            return Ok(Setup::Rejected);
        };

        self.say("\nSelect Game Mode:\n1. PVP (Host vs Guest)\n2. PVE (Player vs Bot)\n")?;
        let mode = match self.read_number("Enter choice (1-2): ")? {
            Entry::Number(1) => GameMode::Pvp,
            Entry::Number(2) => GameMode::Pve,
            Entry::Closed => return Ok(Setup::Closed),
            _ => {
                self.show("Invalid choice!")?;
                return Ok(Setup::Rejected);
            }
        };

        let [a, b] = mode.participants();
        self.say(&format!("\nWho goes first?\n1. {} (X)\n2. {} (O)\n", a, b))?;
        let first = match self.read_number("Enter choice (1-2): ")? {
            Entry::Number(1) => Side::A,
            Entry::Number(2) => Side::B,
            Entry::Closed => return Ok(Setup::Closed),
            _ => {
                self.show("Invalid choice!")?;
                return Ok(Setup::Rejected);
            }
        };

        let settings = MatchSettings::new(size, mode, first);
        debug!(?settings, "Match configured");
        Ok(Setup::Ready(settings))
    }

    fn bot(&self) -> BotActor {
        let name = GameMode::Pve.slot(Side::B).name();
        match self.config.bot_seed() {
            Some(seed) => BotActor::seeded(
                name,
                seed.wrapping_add(self.matches_played),
                self.config.bot_think(),
            ),
            None => BotActor::from_os_rng(name, self.config.bot_think()),
        }
    }

    /// Plays one match and records it in the ledger.
    ///
    /// A failed save is reported on the console and the session goes on.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be read or written.
    #[instrument(skip(self))]
    pub fn play_match(&mut self, settings: MatchSettings) -> io::Result<Flow> {
        let [a, b] = settings.mode().participants();
        let side_a: Box<dyn Actor> = Box::new(HumanActor::new(a.name(), Rc::clone(&self.console)));
        let side_b: Box<dyn Actor> = if settings.mode().has_bot() {
            Box::new(self.bot())
        } else {
            Box::new(HumanActor::new(b.name(), Rc::clone(&self.console)))
        };

        let mut engine = MatchEngine::new(settings, side_a, side_b);
        let mut view = ConsoleView::new(Rc::clone(&self.console));
        self.matches_played += 1;

        match engine.play(&mut view, &mut self.ledger) {
            Ok(report) => {
                log_report(&report);
                Ok(Flow::Continue)
            }
            Err(EngineError::Store(e)) => {
                warn!(error = %e, "Match result not saved");
                self.show(SAVE_FAILED)?;
                Ok(Flow::Continue)
            }
            Err(EngineError::Actor(ActorError::InputClosed)) => {
                info!("Input closed mid-match, match abandoned");
                Ok(Flow::Quit)
            }
            Err(EngineError::Actor(ActorError::Io(e))) => Err(e),
            Err(EngineError::Actor(e)) => {
                warn!(error = %e, "Match abandoned");
                Ok(Flow::Continue)
            }
        }
    }

    /// Prints the statistics table.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be written.
    pub fn show_stats(&mut self) -> io::Result<Flow> {
        self.say(&format!("\n{}", self.ledger.stats()))?;
        Ok(Flow::Continue)
    }

    /// Prints every history block, or why there are none.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be written.
    pub fn show_history(&mut self) -> io::Result<Flow> {
        let history = match self.ledger.history().read_all() {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "History unreadable");
                self.show("\nNo match history found!")?;
                return Ok(Flow::Continue);
            }
        };

        match history {
            History::NoStore => self.show("\nNo match history found!")?,
            History::NoSection => {
                self.show(&format!("\n{}", HISTORY_HEADER))?;
                self.show("No match history available yet!")?;
            }
            History::Blocks(blocks) => {
                let mut text = format!("\n{}\n", HISTORY_HEADER);
                for block in &blocks {
                    text.push_str(block.as_str());
                }
                self.say(&text)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Prints the raw backing store.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot be written.
    pub fn dump(&mut self) -> io::Result<Flow> {
        match self.ledger.store().read_raw() {
            Ok(Some(bytes)) => self.say(&String::from_utf8_lossy(&bytes))?,
            Ok(None) => self.show("\nNo game data found!")?,
            Err(e) => {
                warn!(error = %e, "Store unreadable");
                self.show("\nNo game data found!")?;
            }
        }
        Ok(Flow::Continue)
    }
}

fn log_report(report: &MatchReport) {
    info!(
        outcome = %report.outcome(),
        winner = ?report.winner_slot(),
        moves = report.moves().len(),
        "Match complete"
    );
}
