//! Credential ports

use crate::core::models::Authorization;
use crate::error::PipelineError;

/// Source of authentication for platform calls.
///
/// `Ok(None)` means this provider has nothing to offer and the next one in a
/// fallback chain should be asked.
pub trait CredentialProvider {
    /// Obtain authorization for `identity`
    fn acquire(&mut self, identity: &str) -> Result<Option<Authorization>, PipelineError>;
}

/// Persistent secret storage keyed by account name
pub trait SecretStore {
    /// Human-readable backend name, for messages
    fn backend(&self) -> String;

    /// Stored secret for `account`, `None` when absent
    fn get(&self, account: &str) -> Result<Option<String>, PipelineError>;

    /// Store `secret` for `account`, replacing any previous value
    fn set(&self, account: &str, secret: &str) -> Result<(), PipelineError>;

    /// Remove the secret; returns false when nothing was stored
    fn delete(&self, account: &str) -> Result<bool, PipelineError>;
}
