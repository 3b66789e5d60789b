//! Command implementations

mod licenses;
mod new;
mod setup;
mod token;

pub use licenses::licenses;
pub use new::new_project;
pub use setup::setup;
pub use token::token;

use husk::config::Config;
use husk::error::PipelineError;
use husk::paths;

/// The saved configuration, or defaults when none has been written yet
fn config_or_default() -> Result<Config, PipelineError> {
    let path = paths::config_file();
    if path.exists() { Config::load_from(&path) } else { Ok(Config::default()) }
}
