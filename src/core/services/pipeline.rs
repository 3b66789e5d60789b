//! Pipeline executor - fixed, ordered, fail-fast steps
//!
//! A [`Pipeline`] is a list of named steps sharing one mutable context. Steps
//! run strictly in insertion order. The first step that fails (by returning an
//! error or an unsuccessful [`StepResult`]) stops the run: nothing after it is
//! invoked and nothing before it is undone.
//!
//! ```
//! use husk::core::models::StepResult;
//! use husk::core::services::pipeline::{NullReporter, Pipeline};
//!
//! let mut seen: Vec<String> = Vec::new();
//! let records = Pipeline::new()
//!     .step("first", |seen: &mut Vec<String>| {
//!         seen.push("first".to_string());
//!         Ok(StepResult::done("first done"))
//!     })
//!     .step("second", |seen: &mut Vec<String>| {
//!         seen.push("second".to_string());
//!         Ok(StepResult::skipped("already there"))
//!     })
//!     .run(&mut seen, &mut NullReporter)
//!     .unwrap();
//!
//! assert_eq!(seen, ["first", "second"]);
//! assert!(records[1].result.skipped);
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::models::StepResult;
use crate::core::ports::Reporter;
use crate::error::PipelineError;

type StepAction<'a, C> = Box<dyn FnMut(&mut C) -> Result<StepResult, PipelineError> + 'a>;

struct Step<'a, C> {
    name: &'static str,
    action: StepAction<'a, C>,
}

/// A completed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// Step name
    pub name: String,
    /// What it reported
    #[serde(flatten)]
    pub result: StepResult,
}

/// The step that stopped the run
#[derive(Debug, Error)]
#[error("{}", .result.message)]
pub struct StepFailure {
    /// Failing step name
    pub step: String,
    /// Zero-based position of the failing step
    pub index: usize,
    /// Converted, user-facing result
    pub result: StepResult,
    /// Underlying error, absent when the step reported failure itself
    #[source]
    pub error: Option<PipelineError>,
    /// Steps that completed before the failure; their effects remain
    pub completed: Vec<StepRecord>,
}

impl StepFailure {
    /// Exit code for the failure class
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.error.as_ref().map_or(1, PipelineError::exit_code)
    }
}

/// Ordered, fail-fast list of steps over a shared context `C`
pub struct Pipeline<'a, C> {
    steps: Vec<Step<'a, C>>,
}

impl<C> fmt::Debug for Pipeline<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("steps", &self.names()).finish()
    }
}

impl<C> Default for Pipeline<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> Pipeline<'a, C> {
    /// Empty pipeline
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step
    #[must_use]
    pub fn step<F>(mut self, name: &'static str, action: F) -> Self
    where
        F: FnMut(&mut C) -> Result<StepResult, PipelineError> + 'a,
    {
        self.steps.push(Step {
            name,
            action: Box::new(action),
        });
        self
    }

    /// Append a step only when `enabled`
    #[must_use]
    pub fn step_if<F>(self, enabled: bool, name: &'static str, action: F) -> Self
    where
        F: FnMut(&mut C) -> Result<StepResult, PipelineError> + 'a,
    {
        if enabled { self.step(name, action) } else { self }
    }

    /// Step names in execution order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name).collect()
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when there are no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, stopping at the first failure
    pub fn run(
        mut self,
        ctx: &mut C,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<StepRecord>, StepFailure> {
        let total = self.steps.len();
        let mut completed = Vec::with_capacity(total);

        for (index, step) in self.steps.iter_mut().enumerate() {
            log::debug!("[{}/{total}] {}", index + 1, step.name);
            reporter.step_started(index, step.name);

            let (result, error) = match (step.action)(ctx) {
                Ok(result) => (result, None),
                Err(error) => (StepResult::failed(error.to_string(), error.detail()), Some(error)),
            };
            reporter.step_finished(index, step.name, &result);

            if result.success {
                log::info!("{}", result.message);
                if let Some(detail) = &result.detail {
                    log::debug!("{detail}");
                }
                completed.push(StepRecord {
                    name: step.name.to_string(),
                    result,
                });
                continue;
            }

            log::error!("step `{}` failed: {}", step.name, result.message);
            if let Some(detail) = &result.detail {
                if matches!(error, Some(PipelineError::Process(_))) {
                    log::error!("{detail}");
                } else {
                    log::debug!("{detail}");
                }
            }
            return Err(StepFailure {
                step: step.name.to_string(),
                index,
                result,
                error,
                completed,
            });
        }

        Ok(completed)
    }
}

/// Reporter that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn step_started(&mut self, _index: usize, _name: &str) {}

    fn step_finished(&mut self, _index: usize, _name: &str, _result: &StepResult) {}
}
