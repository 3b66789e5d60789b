//! Questions and answers on a line-oriented terminal
//!
//! Prompts go to the writer (stderr for the real terminal) so stdout stays
//! free for `--json` output. Secrets typed on an interactive terminal are
//! read with echo turned off.

use std::io::{self, BufRead, IsTerminal, StdinLock, Stderr, Write};

use console::Term;

use crate::core::ports::InputProvider;

/// [`InputProvider`] reading lines from `R` and prompting on `W`
#[derive(Debug)]
pub struct TerminalInput<R, W> {
    reader: R,
    writer: W,
    masked: Option<Term>,
}

impl TerminalInput<StdinLock<'static>, Stderr> {
    /// Standard input and standard error.
    ///
    /// Secrets are masked when both streams are attached to a terminal;
    /// piped input is read line by line like any other answer.
    #[must_use]
    pub fn stdio() -> Self {
        let term = Term::stderr();
        let interactive = io::stdin().is_terminal() && term.is_term();
        Self {
            reader: io::stdin().lock(),
            writer: io::stderr(),
            masked: interactive.then_some(term),
        }
    }
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    /// Terminal over arbitrary streams, without masking
    pub const fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            masked: None,
        }
    }

    /// Whether secrets are read with echo turned off
    #[must_use]
    pub const fn masks_secrets(&self) -> bool {
        self.masked.is_some()
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> InputProvider for TerminalInput<R, W> {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.read_line(prompt)
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        let Some(term) = &self.masked else {
            return self.read_line(prompt);
        };
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        term.read_secure_line()
    }

    fn say(&mut self, message: &str) {
        writeln!(self.writer, "{message}").ok();
    }
}
