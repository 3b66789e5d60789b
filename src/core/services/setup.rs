//! One-time template setup
//!
//! Downloads the ignore-file template and every license text the platform
//! offers into the local template directory, then writes a configuration
//! skeleton. Every file is create-only, so re-running only fills gaps.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::Config;
use crate::core::models::{
    ACCEPT_V3, ACCEPT_V3_RAW, HttpRequest, Method, StepResult, TemplateSet,
};
use crate::core::ports::{HttpGateway, Reporter};
use crate::core::services::pipeline::{Pipeline, StepFailure, StepRecord};
use crate::error::PipelineError;
use crate::paths;

#[derive(Debug, Deserialize)]
struct LicenseSummary {
    spdx_id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LicenseText {
    body: String,
}

/// Unauthenticated template downloads
pub struct TemplateFetcher<'a> {
    gateway: &'a dyn HttpGateway,
    api_url: &'a str,
}

impl std::fmt::Debug for TemplateFetcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateFetcher")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl<'a> TemplateFetcher<'a> {
    /// Fetcher talking to `api_url`
    #[must_use]
    pub fn new(gateway: &'a dyn HttpGateway, api_url: &'a str) -> Self {
        Self {
            gateway,
            api_url: api_url.trim_end_matches('/'),
        }
    }

    fn get(&self, url: String, accept: &str) -> Result<String, PipelineError> {
        let request = HttpRequest::new(Method::Get, url)
            .header("User-Agent", format!("{}/{}", paths::PROGRAM, crate::VERSION))
            .header("Accept", accept);
        log::debug!("{} {}", request.method, request.url);
        let outcome = self.gateway.send(&request)?.ensure_success()?;
        Ok(outcome.body)
    }

    /// Save the named ignore template as `.gitignore`
    pub fn fetch_gitignore(
        &self,
        templates: &TemplateSet,
        template: &str,
    ) -> Result<StepResult, PipelineError> {
        let target = templates.gitignore();
        if target.exists() {
            return Ok(StepResult::skipped(format!(
                "A `{}` template was found. Skipping step.",
                paths::GITIGNORE_FILE
            )));
        }
        let body = self.get(
            format!("{}/gitignore/templates/{template}", self.api_url),
            ACCEPT_V3_RAW,
        )?;
        write_file(&target, &body)?;
        Ok(StepResult::done(format!(
            "`{template}` ignore template saved to `{}`.",
            target.display()
        )))
    }

    /// Save every available license text under `licenses/<id>/`
    pub fn fetch_licenses(&self, templates: &TemplateSet) -> Result<StepResult, PipelineError> {
        let listing = self.get(format!("{}/licenses", self.api_url), ACCEPT_V3)?;
        let summaries: Vec<LicenseSummary> = serde_json::from_str(&listing)
            .map_err(|e| PipelineError::Config(format!("unexpected license listing: {e}")))?;

        let mut saved = Vec::new();
        let mut kept = 0_usize;
        for summary in summaries {
            let Some(url) = summary.url else {
                log::debug!("License `{}` has no text. Skipping.", summary.spdx_id);
                continue;
            };
            let target = templates.license_file(&summary.spdx_id);
            if target.exists() {
                kept += 1;
                continue;
            }
            let text: LicenseText = serde_json::from_str(&self.get(url, ACCEPT_V3)?)
                .map_err(|e| PipelineError::Config(format!("unexpected license body: {e}")))?;
            if let Some(dir) = target.parent() {
                fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
            }
            write_file(&target, &text.body)?;
            log::debug!("License `{}` saved.", summary.spdx_id);
            saved.push(summary.spdx_id);
        }

        if saved.is_empty() {
            return Ok(StepResult::skipped(format!(
                "All {kept} license templates were already present."
            )));
        }
        Ok(StepResult::done(format!("{} license templates saved.", saved.len()))
            .with_detail(saved.join(", ")))
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), PipelineError> {
    fs::write(path, content).map_err(|e| PipelineError::io(path, e))
}

/// Create `dirs` if missing
pub fn create_layout(dirs: &[PathBuf]) -> Result<StepResult, PipelineError> {
    for dir in dirs {
        fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
    }
    Ok(StepResult::done("Program folders are in place."))
}

/// Write the configuration skeleton unless a configuration already exists
pub fn write_config_skeleton(path: &Path) -> Result<StepResult, PipelineError> {
    if path.exists() {
        return Ok(StepResult::skipped(format!(
            "A configuration was found at `{}`. Skipping step.",
            path.display()
        )));
    }
    Config::skeleton()
        .save_to(path)
        .map_err(|e| PipelineError::Config(format!("{e:#}")))?;
    Ok(StepResult::done(format!(
        "Configuration skeleton written to `{}`. Set your `username` there.",
        path.display()
    )))
}

/// Where setup writes
#[derive(Debug, Clone)]
pub struct SetupTargets {
    /// Template root
    pub templates: TemplateSet,
    /// Log directory
    pub logs_dir: PathBuf,
    /// Configuration file
    pub config_file: PathBuf,
}

impl SetupTargets {
    /// The standard locations under the program directory
    #[must_use]
    pub fn standard() -> Self {
        Self {
            templates: TemplateSet::new(paths::templates_dir()),
            logs_dir: paths::logs_dir(),
            config_file: paths::config_file(),
        }
    }
}

/// Run the setup steps in order, stopping at the first failure
pub fn run_setup(
    fetcher: &TemplateFetcher<'_>,
    targets: &SetupTargets,
    gitignore_template: &str,
    reporter: &mut dyn Reporter,
) -> Result<Vec<StepRecord>, StepFailure> {
    let layout = vec![targets.templates.docs_dir(), targets.logs_dir.clone()];
    Pipeline::new()
        .step("layout", |_: &mut ()| create_layout(&layout))
        .step("gitignore", |_: &mut ()| {
            fetcher.fetch_gitignore(&targets.templates, gitignore_template)
        })
        .step("licenses", |_: &mut ()| fetcher.fetch_licenses(&targets.templates))
        .step("config", |_: &mut ()| write_config_skeleton(&targets.config_file))
        .run(&mut (), reporter)
}
