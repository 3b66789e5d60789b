//! Output formatting for human and JSON modes
//!
//! Human mode prints one status line per step as it finishes, then a
//! summary. JSON mode stays silent while steps run and prints one document
//! at the end.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::StepResult;
use crate::core::ports::Reporter;
use crate::core::services::{RunSummary, StepFailure, StepRecord};
use crate::error::PipelineError;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

impl OutputMode {
    /// Mode selected by the `--json` flag
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Status line for one finished step, without color
#[must_use]
pub fn status_line(result: &StepResult) -> String {
    let tag = if !result.success {
        "fail"
    } else if result.skipped {
        "skip"
    } else {
        " ok "
    };
    format!("[{tag}] {}", result.message)
}

/// Prints step progress on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    mode: OutputMode,
}

impl ConsoleReporter {
    /// Reporter for `mode`; JSON mode prints nothing
    #[must_use]
    pub const fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl Reporter for ConsoleReporter {
    fn step_started(&mut self, _index: usize, _name: &str) {}

    fn step_finished(&mut self, _index: usize, _name: &str, result: &StepResult) {
        if self.mode == OutputMode::Json {
            return;
        }
        let line = status_line(result);
        if !result.success {
            eprintln!("{}", line.red());
        } else if result.skipped {
            println!("{}", line.yellow());
        } else {
            println!("{}", line.green());
        }
    }
}

impl RunSummary {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("\n{}", "Work successfully finished!".bold());
        if let Some(log_file) = &self.log_file {
            println!(" - Check the log file at `{}`", log_file.display());
        }
        println!(" - Check the project files at `{}`", self.project_folder.display());
        println!(" - Check the remote repository at `{}`", self.remote_url);
    }
}

/// Result of `husk setup`
#[derive(Debug, Serialize)]
pub struct SetupResult {
    /// Template directory
    pub templates_dir: PathBuf,
    /// Configuration file
    pub config_file: PathBuf,
    /// Every step, in order
    pub steps: Vec<StepRecord>,
}

impl SetupResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("\nTemplates are in `{}`.", self.templates_dir.display());
                println!("Before using the program, edit `{}`.", self.config_file.display());
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of `husk licenses`
#[derive(Debug, Serialize)]
pub struct LicenseList {
    /// Available license ids, sorted
    pub licenses: Vec<String>,
}

impl LicenseList {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human if self.licenses.is_empty() => {
                println!("No license templates installed. Run `husk setup` first.");
            },
            OutputMode::Human => {
                for license in &self.licenses {
                    println!("{license}");
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => print_json(self),
        }
    }
}

/// A failed run, as reported to the user
#[derive(Debug, Serialize)]
pub struct FailureReport {
    /// Always false
    pub success: bool,
    /// Step that stopped the run, if a step was running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// User-facing message
    pub message: String,
    /// Raw diagnostic, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Process exit code
    pub exit_code: u8,
    /// Steps that completed before the failure
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub completed: Vec<StepRecord>,
}

impl From<&StepFailure> for FailureReport {
    fn from(failure: &StepFailure) -> Self {
        Self {
            success: false,
            step: Some(failure.step.clone()),
            message: failure.result.message.clone(),
            detail: failure.result.detail.clone(),
            exit_code: failure.exit_code(),
            completed: failure.completed.clone(),
        }
    }
}

impl From<&PipelineError> for FailureReport {
    fn from(error: &PipelineError) -> Self {
        Self {
            success: false,
            step: None,
            message: error.to_string(),
            detail: error.detail(),
            exit_code: error.exit_code(),
            completed: Vec::new(),
        }
    }
}

impl FailureReport {
    /// Render the failure based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if let Some(step) = &self.step {
                    eprintln!("{} step `{step}` failed: {}", "Error:".red().bold(), self.message);
                } else {
                    eprintln!("{} {}", "Error:".red().bold(), self.message);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}
