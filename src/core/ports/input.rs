//! Interactive input port

use std::io;

/// Asks the user questions.
///
/// Pipeline logic never touches the terminal directly; everything goes
/// through this trait so argument-driven and scripted runs behave the same.
pub trait InputProvider {
    /// Ask a question and return the answer without the line ending
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Ask for a secret
    fn ask_secret(&mut self, prompt: &str) -> io::Result<String>;

    /// Show an informational line
    fn say(&mut self, message: &str);
}
