//! Pipeline services
//!
//! Each service wraps one kind of side effect and turns it into a
//! [`StepResult`](crate::core::models::StepResult). They reach the outside
//! world only through the port traits.
//!
//! - [`pipeline`] - Ordered, fail-fast step executor
//! - [`scaffold`] - Project files from templates
//! - [`environment`] - Runtime environment through `pipenv`
//! - [`vcs`] - Local repository through `git`
//! - [`remote`] - Remote repository and pages through the REST API
//! - [`input`] - Input collection and confirmation
//! - [`credentials`] - Token store and password prompt
//! - [`bootstrap`] - The full run, wiring the above together
//! - [`setup`] - One-time template download

pub mod bootstrap;
pub mod credentials;
pub mod environment;
pub mod input;
pub mod pipeline;
pub mod remote;
pub mod scaffold;
pub mod setup;
pub mod vcs;

pub use bootstrap::{Bootstrap, RunContext, RunSummary};
pub use credentials::{Fallback, PasswordPrompt, StoredToken, delete_token, store_token};
pub use input::{ProjectArgs, collect_project, confirm};
pub use pipeline::{NullReporter, Pipeline, StepFailure, StepRecord};
pub use setup::{SetupTargets, TemplateFetcher, run_setup};
