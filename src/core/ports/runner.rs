//! External command port

use std::path::Path;

use crate::error::ProcessError;

/// Runs an external process to completion.
///
/// Implementations inherit the caller's environment, run in `workdir`,
/// and never retry.
pub trait CommandRunner {
    /// Run `command` (program followed by arguments) and return its stdout
    fn run(&self, command: &[&str], workdir: &Path) -> Result<String, ProcessError>;
}
