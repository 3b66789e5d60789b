//! Input collection and the confirmation gate
//!
//! Values given on the command line are validated once and rejected outright
//! when invalid. Missing values are asked for interactively, re-asking until
//! the answer is valid.

use std::io;
use std::path::{Path, PathBuf};

use crate::core::models::{LicenseCatalog, ProjectSpec, is_empty_folder, normalize_name};
use crate::core::ports::InputProvider;
use crate::error::PipelineError;

/// Values supplied up front, typically from command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectArgs {
    /// Project folder; the working directory when absent
    pub folder: Option<PathBuf>,
    /// Repository name as typed
    pub name: Option<String>,
    /// Repository description
    pub description: Option<String>,
    /// License id
    pub license: Option<String>,
}

fn read_error(e: &io::Error) -> PipelineError {
    PipelineError::Input(format!("could not read input: {e}"))
}

/// Gather and validate everything needed to build a [`ProjectSpec`]
pub fn collect_project(
    args: &ProjectArgs,
    cwd: &Path,
    catalog: &LicenseCatalog,
    input: &mut dyn InputProvider,
) -> Result<ProjectSpec, PipelineError> {
    let folder = args.folder.clone().unwrap_or_else(|| cwd.to_path_buf());
    if !folder.is_dir() {
        return Err(PipelineError::Input(format!(
            "directory `{}` doesn't exist.",
            folder.display()
        )));
    }
    if catalog.is_empty() {
        return Err(PipelineError::Config(
            "no license templates are installed. Run `husk setup` first".to_string(),
        ));
    }
    log::info!("Local project directory will be `{}`", folder.display());

    let name = match &args.name {
        Some(name) => name.clone(),
        None => ask_name(input)?,
    };
    log::info!("Repo name will be `{}`", normalize_name(&name));

    let description = match &args.description {
        Some(description) => description.clone(),
        None => input
            .ask("Repository description (optional): ")
            .map_err(|e| read_error(&e))?,
    };
    log::info!("Repo description will be `{}`", description.trim());

    let license = match &args.license {
        Some(license) => license.clone(),
        None => ask_license(catalog, input)?,
    };
    log::info!("Project will be under `{license}` license");

    ProjectSpec::new(&name, &description, &license, folder, catalog)
}

fn ask_name(input: &mut dyn InputProvider) -> Result<String, PipelineError> {
    loop {
        let answer = input
            .ask("\nRepository name (keep it short): ")
            .map_err(|e| read_error(&e))?;
        if !normalize_name(&answer).is_empty() {
            return Ok(answer);
        }
        log::debug!("Empty repository name entered");
        input.say(" - Error: repository name can't be empty.");
    }
}

fn ask_license(
    catalog: &LicenseCatalog,
    input: &mut dyn InputProvider,
) -> Result<String, PipelineError> {
    let available = catalog.ids().collect::<Vec<_>>().join(", ");
    loop {
        input.say(&format!("\nAvailable licenses: {available}"));
        let answer = input
            .ask("License for the project: ")
            .map_err(|e| read_error(&e))?;
        let answer = answer.trim();
        if catalog.contains(answer) {
            return Ok(answer.to_string());
        }
        log::debug!("Unavailable license `{answer}` entered");
        input.say(&format!(" - Error: `{answer}` license is not available."));
    }
}

/// Show the gathered values and require an explicit yes.
///
/// A non-empty folder triggers a warning but does not block. With
/// `assume_yes` the question is skipped.
pub fn confirm(
    spec: &ProjectSpec,
    input: &mut dyn InputProvider,
    assume_yes: bool,
) -> Result<(), PipelineError> {
    input.say(&format!("\n{:>25} {}", "Repository name:", spec.name));
    input.say(&format!("{:>25} {}", "Repository description:", spec.description));
    input.say(&format!("{:>25} {}", "Project license:", spec.license));
    input.say(&format!("{:>25} {}", "Project folder:", spec.folder.display()));

    if !is_empty_folder(&spec.folder)? {
        input.say("\n   *** WARNING: project folder is not empty!! ***");
        input.say("Make sure there is no confidential information inside");
    }

    if assume_yes {
        return Ok(());
    }

    let answer = input
        .ask("\nIs this info correct? (y/N): ")
        .map_err(|e| read_error(&e))?;
    if is_affirmative(&answer) {
        Ok(())
    } else {
        log::info!("Program cancelled by the user.");
        Err(PipelineError::Cancelled)
    }
}

/// `y` or `yes`, any case
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
