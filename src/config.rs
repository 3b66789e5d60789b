//! Program configuration
//!
//! Loaded once from `~/.config/husk/config.json` at the start of a run and
//! passed by reference into the pipeline. Nothing mutates it afterwards.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::paths;

/// Immutable run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Account on the hosting platform; owner of created repositories
    #[serde(default)]
    pub username: Option<String>,
    /// Readme sections, in order (title -> markdown body)
    #[serde(default)]
    pub readme_content: IndexMap<String, String>,
    /// Whether to scaffold `docs/` and enable pages
    #[serde(default)]
    pub enable_gh_pages: bool,
    /// Keys written to `docs/_config.yml`
    #[serde(default)]
    pub jekyll_config: IndexMap<String, String>,
    /// Runtime version the environment is pinned to
    #[serde(default = "default_python_version")]
    pub python_version: String,
    /// Linter installed as a development dependency
    #[serde(default = "default_linter")]
    pub linter: String,
    /// REST API root of the hosting platform
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Web root used to build clone and browse URLs
    #[serde(default = "default_web_url")]
    pub web_url: String,
    /// Branch committed to, pushed, and served by pages
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Ignore template fetched by `husk setup`
    #[serde(default = "default_gitignore_template")]
    pub gitignore_template: String,
    /// Upper bound for a single HTTP call
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_python_version() -> String {
    "3".to_string()
}

fn default_linter() -> String {
    "flake8".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_gitignore_template() -> String {
    "Python".to_string()
}

const fn default_http_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            readme_content: IndexMap::new(),
            enable_gh_pages: false,
            jekyll_config: IndexMap::new(),
            python_version: default_python_version(),
            linter: default_linter(),
            api_url: default_api_url(),
            web_url: default_web_url(),
            branch: default_branch(),
            gitignore_template: default_gitignore_template(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from `path`
    pub fn load_from(path: &Path) -> Result<Self, PipelineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "cannot read `{}` ({e}). Run `husk setup` first",
                path.display()
            ))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| PipelineError::Config(format!("invalid `{}`: {e}", path.display())))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self, PipelineError> {
        Self::load_from(&paths::config_file())
    }

    /// Configured identity, required before anything touches the network
    pub fn identity(&self) -> Result<&str, PipelineError> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| PipelineError::Config("a username was not configured".to_string()))
    }

    /// Starter config written by `husk setup`
    #[must_use]
    pub fn skeleton() -> Self {
        let mut readme_content = IndexMap::new();
        readme_content.insert("Installation".to_string(), "How to install the project.\n".to_string());
        readme_content.insert("Usage".to_string(), "How to use the project.\n".to_string());

        let mut jekyll_config = IndexMap::new();
        jekyll_config.insert("theme".to_string(), "jekyll-theme-minimal".to_string());

        Self {
            readme_content,
            jekyll_config,
            ..Self::default()
        }
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
