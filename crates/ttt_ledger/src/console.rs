//! Text console: prompts on a reader, output on a writer.

use crate::actors::InputSource;
use crate::engine::{MatchEvent, MatchObserver};
use std::cell::RefCell;
use std::io::{self, BufRead, Stdout, StdinLock, Write};
use std::rc::Rc;
use tracing::warn;

/// Line-oriented console over any reader and writer.
#[derive(Debug)]
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes `text` as is and flushes.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }

    /// The output writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Wraps the console for sharing between actors and views.
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

impl<R: BufRead, W: Write> InputSource for Console<R, W> {
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.say(prompt)?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn show(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)?;
        self.writer.flush()
    }
}

/// Prints match progress to a shared console.
#[derive(Debug)]
pub struct ConsoleView<R, W> {
    console: Rc<RefCell<Console<R, W>>>,
}

impl<R: BufRead, W: Write> ConsoleView<R, W> {
    /// View writing to `console`.
    pub fn new(console: Rc<RefCell<Console<R, W>>>) -> Self {
        Self { console }
    }

    fn render(&self, event: &MatchEvent<'_>) -> Option<String> {
        match event {
            MatchEvent::Started(settings) => {
                let [a, b] = settings.mode().participants();
                Some(format!(
                    "\n=== GAME STARTED ===\nBoard Size: {}\nMode: {} - {} (X) vs {} (O)\n",
                    settings.size(),
                    settings.mode(),
                    a,
                    b
                ))
            }
            MatchEvent::Turn {
                board,
                name,
                automated,
                ..
            } => {
                let mut text = board.render();
                if *automated {
                    text.push_str(&format!("{} is thinking...\n", name));
                }
                Some(text)
            }
            MatchEvent::Moved {
                name,
                position,
                automated: true,
            } => Some(format!("{} chose position {}\n", name, position)),
            MatchEvent::Moved { .. } => None,
            MatchEvent::Finished(report) => {
                let mut text = report.board().render();
                match report.winner_slot() {
                    Some(slot) => text.push_str(&format!("Congratulations! {} wins!\n", slot)),
                    None => text.push_str("It's a draw!\n"),
                }
                Some(text)
            }
        }
    }
}

impl<R: BufRead, W: Write> MatchObserver for ConsoleView<R, W> {
    fn on_event(&mut self, event: &MatchEvent<'_>) {
        let Some(text) = self.render(event) else {
            return;
        };
        if let Err(e) = self.console.borrow_mut().say(&text) {
            warn!(error = %e, "Console write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(console: &Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8_lossy(console.writer()).into_owned()
    }

    #[test]
    fn test_prompt_strips_line_ending() {
        let mut console = Console::new(&b"5\r\nabc\n"[..], Vec::new());
        assert_eq!(console.prompt_line("> ").unwrap().as_deref(), Some("5"));
        assert_eq!(console.prompt_line("> ").unwrap().as_deref(), Some("abc"));
        assert_eq!(console.prompt_line("> ").unwrap(), None);
        assert_eq!(output(&console), "> > > ");
    }

    #[test]
    fn test_show_appends_newline() {
        let mut console = Console::new(&b""[..], Vec::new());
        console.show("Goodbye!").unwrap();
        assert_eq!(output(&console), "Goodbye!\n");
    }
}
