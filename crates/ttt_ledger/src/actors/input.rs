//! Line-oriented input used by interactive actors and the menu.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// One answer to a numeric prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The line parsed as an integer.
    Number(i64),
    /// Anything else, as typed.
    Text(String),
    /// End of input.
    Closed,
}

/// Prompts for lines and shows messages.
pub trait InputSource {
    /// Shows `prompt` without a newline and reads one line.
    ///
    /// Returns `None` at end of input. The line terminator is stripped.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Shows one line of text.
    fn show(&mut self, message: &str) -> io::Result<()>;

    /// Prompts for an integer.
    fn read_number(&mut self, prompt: &str) -> io::Result<Entry> {
        Ok(match self.prompt_line(prompt)? {
            None => Entry::Closed,
            Some(line) => match line.trim().parse::<i64>() {
                Ok(n) => Entry::Number(n),
                Err(_) => Entry::Text(line),
            },
        })
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).prompt_line(prompt)
    }

    fn show(&mut self, message: &str) -> io::Result<()> {
        (**self).show(message)
    }
}

impl<T: InputSource + ?Sized> InputSource for Rc<RefCell<T>> {
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.borrow_mut().prompt_line(prompt)
    }

    fn show(&mut self, message: &str) -> io::Result<()> {
        self.borrow_mut().show(message)
    }
}
