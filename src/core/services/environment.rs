//! Environment provisioner - isolated runtime via `pipenv`

use std::path::Path;

use crate::core::models::StepResult;
use crate::core::ports::CommandRunner;
use crate::error::PipelineError;

const ENV_TOOL: &str = "pipenv";

/// Drives the environment tool through the command runner
#[derive(Clone, Copy)]
pub struct EnvironmentProvisioner<'a> {
    runner: &'a dyn CommandRunner,
}

impl std::fmt::Debug for EnvironmentProvisioner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentProvisioner").field("tool", &ENV_TOOL).finish()
    }
}

impl<'a> EnvironmentProvisioner<'a> {
    /// Provisioner running commands through `runner`
    #[must_use]
    pub const fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Create an environment pinned to `version`
    pub fn create(&self, folder: &Path, version: &str) -> Result<StepResult, PipelineError> {
        let output = self.runner.run(&[ENV_TOOL, "--python", version], folder)?;
        Ok(StepResult::done(format!("Python {version} virtual environment created."))
            .with_detail(output))
    }

    /// Install `package` as a development-only dependency
    pub fn install_dev(&self, folder: &Path, package: &str) -> Result<StepResult, PipelineError> {
        let output = self.runner.run(&[ENV_TOOL, "install", package, "--dev"], folder)?;
        Ok(StepResult::done(format!("`{package}` linter installed.")).with_detail(output))
    }

    /// Absolute interpreter path inside the environment
    pub fn interpreter_path(&self, folder: &Path) -> Result<String, PipelineError> {
        let output = self.runner.run(&[ENV_TOOL, "--py"], folder)?;
        let interpreter = output.trim().to_string();
        log::debug!("Interpreter path: `{interpreter}`");
        Ok(interpreter)
    }
}
