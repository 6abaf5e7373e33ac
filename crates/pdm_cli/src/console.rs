//! Line-oriented prompt helpers over any `BufRead`/`Write` pair.
//!
//! # Invariants
//! - End of input surfaces as [`ConsoleError::EndOfInput`], never as a panic.
//! - Parse failures are reported to the user and yield `None`; callers decide
//!   whether to re-prompt.

use pdm_core::RecordId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug)]
pub enum ConsoleError {
    /// Input stream closed while a prompt was waiting.
    EndOfInput,
    Io(io::Error),
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndOfInput => f.write_str("end of input"),
            Self::Io(err) => write!(f, "console I/O failed: {err}"),
        }
    }
}

impl Error for ConsoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EndOfInput => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> ConsoleResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `label`, then reads one line without its line terminator.
    pub fn ask(&mut self, label: &str) -> ConsoleResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(ConsoleError::EndOfInput);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    pub fn ask_id(&mut self, label: &str) -> ConsoleResult<Option<RecordId>> {
        let raw = self.ask(label)?;
        match raw.trim().parse::<RecordId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                self.say(format!("Invalid id `{}`.", raw.trim()))?;
                Ok(None)
            }
        }
    }

    pub fn ask_amount(&mut self, label: &str) -> ConsoleResult<Option<f64>> {
        let raw = self.ask(label)?;
        match raw.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => Ok(Some(amount)),
            _ => {
                self.say(format!("Invalid amount `{}`.", raw.trim()))?;
                Ok(None)
            }
        }
    }

    /// Like [`Self::ask_amount`], but a blank answer means "keep" and yields
    /// `Ok(Some(None))`. `Ok(None)` signals an invalid answer.
    pub fn ask_optional_amount(&mut self, label: &str) -> ConsoleResult<Option<Option<f64>>> {
        let raw = self.ask(label)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Some(None));
        }
        match trimmed.parse::<f64>() {
            Ok(amount) if amount.is_finite() => Ok(Some(Some(amount))),
            _ => {
                self.say(format!("Invalid amount `{trimmed}`."))?;
                Ok(None)
            }
        }
    }

    /// Shows a numbered menu and returns the chosen 1-based entry.
    /// Re-prompts until the answer is in range.
    pub fn choose(&mut self, title: &str, entries: &[&str]) -> ConsoleResult<usize> {
        loop {
            self.say("")?;
            self.say(title)?;
            for (position, entry) in entries.iter().enumerate() {
                self.say(format!("{}. {entry}", position + 1))?;
            }

            let raw = self.ask("Choose an option: ")?;
            match raw.trim().parse::<usize>() {
                Ok(choice) if (1..=entries.len()).contains(&choice) => return Ok(choice),
                _ => self.say(format!(
                    "Invalid choice `{}`; enter a number from 1 to {}.",
                    raw.trim(),
                    entries.len()
                ))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Console, ConsoleError};
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.output).unwrap()
    }

    #[test]
    fn ask_strips_line_terminators_only() {
        let mut console = console("  padded  \r\nnext\n");
        assert_eq!(console.ask("> ").unwrap(), "  padded  ");
        assert_eq!(console.ask("> ").unwrap(), "next");
        assert!(matches!(console.ask("> "), Err(ConsoleError::EndOfInput)));
    }

    #[test]
    fn choose_reprompts_until_valid() {
        let mut console = console("abc\n0\n3\n2\n");
        assert_eq!(console.choose("Menu", &["One", "Two"]).unwrap(), 2);
        let text = output(console);
        assert!(text.contains("Invalid choice `abc`"));
        assert!(text.contains("Invalid choice `0`"));
        assert!(text.contains("Invalid choice `3`"));
        assert!(text.contains("1. One\n2. Two\n"));
    }

    #[test]
    fn numeric_prompts_report_bad_input() {
        let mut console = console("x\n7\n-2.5\nNaN\n\n12\n");
        assert_eq!(console.ask_id("id: ").unwrap(), None);
        assert_eq!(console.ask_id("id: ").unwrap(), Some(7));
        assert_eq!(console.ask_amount("amount: ").unwrap(), Some(-2.5));
        assert_eq!(console.ask_amount("amount: ").unwrap(), None);
        assert_eq!(console.ask_optional_amount("amount: ").unwrap(), Some(None));
        assert_eq!(console.ask_optional_amount("amount: ").unwrap(), Some(Some(12.0)));
        let text = output(console);
        assert!(text.contains("Invalid id `x`."));
        assert!(text.contains("Invalid amount `NaN`."));
    }
}
