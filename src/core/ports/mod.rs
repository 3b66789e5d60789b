//! Port traits (interfaces) for external collaborators
//!
//! The pipeline services depend only on these traits, never on concrete
//! implementations. Adapters in `crate::adapters` talk to the real world;
//! tests substitute in-memory fakes.
//!
//! - [`CommandRunner`] - External processes
//! - [`HttpGateway`] - The hosting platform's REST API
//! - [`CredentialProvider`] / [`SecretStore`] - Authentication material
//! - [`InputProvider`] - Interactive questions and answers
//! - [`Reporter`] - Step progress shown to the user

mod credentials;
mod http;
mod input;
mod reporter;
mod runner;

pub use credentials::{CredentialProvider, SecretStore};
pub use http::HttpGateway;
pub use input::InputProvider;
pub use reporter::Reporter;
pub use runner::CommandRunner;
