//! External commands through `std::process`

use std::path::Path;
use std::process::Command;

use crate::core::ports::CommandRunner;
use crate::error::ProcessError;

/// Runs commands on the host, inheriting its environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &[&str], workdir: &Path) -> Result<String, ProcessError> {
        let line = command.join(" ");
        let Some((program, args)) = command.split_first() else {
            return Err(ProcessError::Spawn {
                command: line,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
            });
        };

        log::debug!("Running `{line}` in `{}`", workdir.display());
        let output = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .output()
            .map_err(|source| ProcessError::Spawn {
                command: line.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            return Err(ProcessError::Exit {
                command: line,
                code: output.status.code(),
                stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(stdout)
    }
}
