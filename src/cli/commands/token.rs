//! Manage the OAuth token

use husk::adapters::{KeyringStore, TerminalInput};
use husk::core::services::{delete_token, store_token};
use husk::output::{OperationResult, OutputMode};

use crate::cli::app::TokenAction;

/// Store or delete the token for a user
pub fn token(action: TokenAction, mode: OutputMode) -> anyhow::Result<()> {
    let config = super::config_or_default()?;
    let store = KeyringStore::for_api(&config.api_url);

    let result = match action {
        TokenAction::Store { username } => {
            let message = store_token(&store, &mut TerminalInput::stdio(), &username)?;
            OperationResult {
                success: true,
                message,
            }
        },
        TokenAction::Delete { username } => {
            let (success, message) = delete_token(&store, &username)?;
            OperationResult { success, message }
        },
    };
    result.render(mode);
    Ok(())
}
