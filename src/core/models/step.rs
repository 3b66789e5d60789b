//! Outcome of a single pipeline step

use serde::Serialize;

/// What a step reports back to the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// Whether the pipeline may continue
    pub success: bool,
    /// Human-readable status line
    pub message: String,
    /// Raw diagnostic (command output, response body)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The work was already done and left untouched
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
}

impl StepResult {
    /// Successful step
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            detail: None,
            skipped: false,
        }
    }

    /// Create-only target already existed; not an error
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            skipped: true,
            ..Self::done(message)
        }
    }

    /// Failed step
    pub fn failed(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            detail,
            skipped: false,
        }
    }

    /// Attach a raw diagnostic
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
