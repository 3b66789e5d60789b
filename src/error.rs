//! Error taxonomy for the bootstrap pipeline
//!
//! Every failure a step can hit is converted into a [`PipelineError`] before it
//! leaves the step. The binary maps each class to its own exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of an external command
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process could not be started at all
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The command line that was attempted
        command: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully
    #[error("`{command}` exited with {}", exit_label(.code))]
    Exit {
        /// The command line that was run
        command: String,
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit code (terminated by signal)".to_string(), |c| format!("status {c}"))
}

impl ProcessError {
    /// Captured output, for the log file
    #[must_use]
    pub fn captured_output(&self) -> Option<String> {
        match self {
            Self::Spawn { .. } => None,
            Self::Exit { stdout, stderr, .. } => {
                Some(format!("stdout:\n{stdout}\nstderr:\n{stderr}"))
            },
        }
    }
}

/// Failure of an HTTP call to the hosting platform
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered outside the 2xx band
    #[error("Error {status}: {reason}{}", server_suffix(.message, .body))]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
        /// The `message` field of a JSON error body, when present
        message: Option<String>,
        /// Raw response body
        body: String,
    },
}

const BODY_PREVIEW_CHARS: usize = 200;

fn server_suffix(message: &Option<String>, body: &str) -> String {
    if let Some(m) = message {
        return format!(" ({m})");
    }
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    let mut preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    if body.chars().count() > BODY_PREVIEW_CHARS {
        preview.push_str("...");
    }
    format!(" ({preview})")
}

/// Any failure that aborts the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid or missing required input
    #[error("{0}")]
    Input(String),

    /// The user declined the confirmation gate
    #[error("cancelled by the user")]
    Cancelled,

    /// External command failure
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// HTTP failure
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Filesystem failure outside the create-only skip policy
    #[error("{}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Credentials could not be obtained
    #[error("credentials unavailable: {0}")]
    Credentials(String),

    /// Program configuration is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Build an [`PipelineError::Io`] for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this failure class
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Input(_) => 2,
            Self::Process(_) => 3,
            Self::Network(_) => 4,
            Self::Cancelled => 5,
            Self::Config(_) | Self::Credentials(_) => 6,
            Self::Io { .. } => 7,
        }
    }

    /// Raw diagnostic worth keeping in the log but not on screen
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Process(e) => e.captured_output(),
            Self::Network(NetworkError::Status { body, .. }) => Some(body.clone()),
            _ => None,
        }
    }
}
