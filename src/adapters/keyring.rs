//! Token storage in the OS credential manager
//!
//! Uses the system keychain (macOS Keychain, Linux Secret Service, Windows
//! Credential Manager). Entries live under service `husk:<api_url>` with the
//! account name as the key.

use keyring::Entry;

use crate::core::ports::SecretStore;
use crate::error::PipelineError;
use crate::paths;

fn keyring_error(e: &keyring::Error) -> PipelineError {
    PipelineError::Credentials(format!("keychain error: {e}"))
}

/// [`SecretStore`] backed by the `keyring` crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Store scoped to the platform at `api_url`
    #[must_use]
    pub fn for_api(api_url: &str) -> Self {
        Self {
            service: format!("{}:{}", paths::PROGRAM, api_url.trim_end_matches('/')),
        }
    }

    /// Service name entries are stored under
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, account: &str) -> Result<Entry, PipelineError> {
        Entry::new(&self.service, account).map_err(|e| keyring_error(&e))
    }
}

impl SecretStore for KeyringStore {
    fn backend(&self) -> String {
        format!("system keychain (`{}`)", self.service)
    }

    fn get(&self, account: &str) -> Result<Option<String>, PipelineError> {
        match self.entry(account)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_error(&e)),
        }
    }

    fn set(&self, account: &str, secret: &str) -> Result<(), PipelineError> {
        self.entry(account)?
            .set_password(secret)
            .map_err(|e| keyring_error(&e))
    }

    fn delete(&self, account: &str) -> Result<bool, PipelineError> {
        match self.entry(account)?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(keyring_error(&e)),
        }
    }
}
