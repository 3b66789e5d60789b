//! Credential providers
//!
//! A stored token is preferred; without one the user is asked for a password.
//! Either way the result only lives in memory for the current run.

use crate::core::models::{Authorization, Credentials};
use crate::core::ports::{CredentialProvider, InputProvider, SecretStore};
use crate::error::PipelineError;

/// Reads a token from a [`SecretStore`]
#[derive(Debug)]
pub struct StoredToken<S> {
    store: S,
}

impl<S: SecretStore> StoredToken<S> {
    /// Provider backed by `store`
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: SecretStore> CredentialProvider for StoredToken<S> {
    fn acquire(&mut self, identity: &str) -> Result<Option<Authorization>, PipelineError> {
        match self.store.get(identity) {
            Ok(Some(token)) => {
                log::debug!("OAuth token retrieved from {}.", self.store.backend());
                Ok(Some(Authorization::Token(token)))
            },
            Ok(None) => Ok(None),
            Err(e) => {
                log::warn!("No usable credential manager: {e}");
                Ok(None)
            },
        }
    }
}

/// Asks for the password twice until both entries match
pub struct PasswordPrompt<'a> {
    input: &'a mut dyn InputProvider,
}

impl std::fmt::Debug for PasswordPrompt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordPrompt").finish_non_exhaustive()
    }
}

impl<'a> PasswordPrompt<'a> {
    /// Prompt through `input`
    pub fn new(input: &'a mut dyn InputProvider) -> Self {
        Self { input }
    }
}

impl CredentialProvider for PasswordPrompt<'_> {
    fn acquire(&mut self, identity: &str) -> Result<Option<Authorization>, PipelineError> {
        log::debug!("Asking for credentials.");
        loop {
            let secret = self
                .input
                .ask_secret("\nPlease enter your GitHub password: ")
                .map_err(|e| PipelineError::Credentials(e.to_string()))?;
            let again = self
                .input
                .ask_secret("Please re-enter your GitHub password: ")
                .map_err(|e| PipelineError::Credentials(e.to_string()))?;
            if secret == again {
                return Ok(Some(Authorization::Basic(Credentials {
                    identity: identity.to_string(),
                    secret,
                })));
            }
            log::debug!("Passwords do not match.");
            self.input.say(" - Error: passwords do not match.");
        }
    }
}

/// Tries `primary`, then `fallback`
#[derive(Debug)]
pub struct Fallback<A, B> {
    primary: A,
    fallback: B,
}

impl<A: CredentialProvider, B: CredentialProvider> Fallback<A, B> {
    /// Chain two providers
    pub const fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: CredentialProvider, B: CredentialProvider> CredentialProvider for Fallback<A, B> {
    fn acquire(&mut self, identity: &str) -> Result<Option<Authorization>, PipelineError> {
        match self.primary.acquire(identity)? {
            Some(auth) => Ok(Some(auth)),
            None => self.fallback.acquire(identity),
        }
    }
}

/// Ask for a token and save it for `username`
pub fn store_token(
    store: &dyn SecretStore,
    input: &mut dyn InputProvider,
    username: &str,
) -> Result<String, PipelineError> {
    let token = input
        .ask_secret("\nPlease enter GitHub OAuth token: ")
        .map_err(|e| PipelineError::Input(format!("could not read input: {e}")))?;
    let token = token.trim();
    if token.is_empty() {
        return Err(PipelineError::Input("the token can't be empty.".to_string()));
    }
    store.set(username, token)?;
    log::debug!("Token for `{username}` saved in {}.", store.backend());
    Ok(format!("OAuth token for {username} stored in {}.", store.backend()))
}

/// Remove the token for `username`; a missing token is reported, not fatal
pub fn delete_token(store: &dyn SecretStore, username: &str) -> Result<(bool, String), PipelineError> {
    if store.delete(username)? {
        Ok((true, format!("OAuth token for {username} deleted from {}.", store.backend())))
    } else {
        Ok((false, format!("No token was found for {username} in {}.", store.backend())))
    }
}
