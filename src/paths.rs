//! Centralized path definitions for husk
//!
//! All user-level state lives under one program directory:
//!
//! ```text
//! ~/.config/husk/
//! ├── config.json                 # Identity, readme sections, toggles
//! ├── logs/                       # One timestamped log file per run
//! │   └── 2024_08_21_08_35_59.log
//! └── templates/                  # Populated by `husk setup`
//!     ├── .gitignore
//!     ├── docs/                   # Pages template tree
//!     └── licenses/
//!         ├── MIT/LICENSE
//!         └── Unlicense/UNLICENSE
//! ```
//!
//! Files produced inside a project folder are named here as well.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Program name, used in paths, headers, and attribution
pub const PROGRAM: &str = "husk";

/// Configuration filename
const CONFIG_FILE: &str = "config.json";

/// Template subdirectory
const TEMPLATES_DIR: &str = "templates";

/// Log subdirectory
const LOGS_DIR: &str = "logs";

/// Readme written into the project folder
pub const README_FILE: &str = "readme.md";

/// Ignore rules copied into the project folder
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Pages directory inside the project folder
pub const DOCS_DIR: &str = "docs";

/// Pages index, a copy of the readme
pub const PAGES_INDEX_FILE: &str = "index.md";

/// Pages site configuration
pub const PAGES_CONFIG_FILE: &str = "_config.yml";

/// Editor configuration directory
pub const EDITOR_DIR: &str = ".vscode";

/// Editor settings file
pub const EDITOR_SETTINGS_FILE: &str = "settings.json";

/// Get the program directory.
///
/// Returns `~/.config/husk/`.
#[must_use]
pub fn program_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".config")
        .join(PROGRAM)
}

/// Get the config file path.
#[must_use]
pub fn config_file() -> PathBuf {
    program_dir().join(CONFIG_FILE)
}

/// Get the template directory.
#[must_use]
pub fn templates_dir() -> PathBuf {
    program_dir().join(TEMPLATES_DIR)
}

/// Get the log directory.
#[must_use]
pub fn logs_dir() -> PathBuf {
    program_dir().join(LOGS_DIR)
}

/// Log file for a run started at `started`.
///
/// Format: `logs/2024_08_21_08_35_59.log`.
#[must_use]
pub fn log_file(started: DateTime<Local>) -> PathBuf {
    logs_dir().join(format!("{}.log", started.format("%Y_%m_%d_%H_%M_%S")))
}

/// License filename for a catalog id.
///
/// The Unlicense ships as `UNLICENSE`; everything else is `LICENSE`.
#[must_use]
pub fn license_file_name(license: &str) -> &'static str {
    if license.eq_ignore_ascii_case("unlicense") {
        "UNLICENSE"
    } else {
        "LICENSE"
    }
}

/// Get `<folder>/docs`.
#[must_use]
pub fn docs_dir(folder: &Path) -> PathBuf {
    folder.join(DOCS_DIR)
}

/// Get `<folder>/.vscode/settings.json`.
#[must_use]
pub fn editor_settings(folder: &Path) -> PathBuf {
    folder.join(EDITOR_DIR).join(EDITOR_SETTINGS_FILE)
}
