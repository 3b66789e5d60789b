//! Core logic for husk
//!
//! Everything here talks to the outside world only through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (ProjectSpec, StepResult, HTTP shapes)
//! - `services/` - The pipeline executor and the steps it runs
//! - `ports/` - Trait definitions for external collaborators

pub mod models;
pub mod ports;
pub mod services;
