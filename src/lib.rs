//! husk - bootstrap a new project from the command line
//!
//! Scaffolds the project files, provisions a `pipenv` environment, makes the
//! first commit, creates and pushes the remote repository and, optionally,
//! turns on pages publishing. Every step runs in a fixed order and the first
//! failure stops the run.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod paths;
