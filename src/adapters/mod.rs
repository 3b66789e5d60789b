//! Adapter implementations for port traits
//!
//! Concrete implementations that handle I/O:
//!
//! - `process` - External commands through `std::process`
//! - `http` - Blocking REST calls through `reqwest`
//! - `keyring` - Token storage in the OS credential manager
//! - `terminal` - Questions and answers on stdin/stderr

pub mod http;
pub mod keyring;
pub mod process;
pub mod terminal;

pub use http::ReqwestGateway;
pub use keyring::KeyringStore;
pub use process::SystemRunner;
pub use terminal::TerminalInput;
