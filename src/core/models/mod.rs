//! Domain models for husk
//!
//! Plain data with no collaborators attached.
//!
//! - [`ProjectSpec`] - The project being bootstrapped
//! - [`StepResult`] - What one pipeline step reports
//! - [`LicenseCatalog`] / [`TemplateSet`] - Read-only template inputs
//! - [`HttpRequest`] / [`HttpOutcome`] / [`Authorization`] - Platform API shapes

mod http;
mod license;
mod project;
mod step;

pub use http::{
    ACCEPT_V3, ACCEPT_V3_RAW, Authorization, Credentials, HttpOutcome, HttpRequest, Method,
    user_agent,
};
pub use license::{LicenseCatalog, TemplateSet};
pub use project::{ProjectSpec, is_empty_folder, normalize_name};
pub use step::StepResult;
