//! Project description gathered before the pipeline starts

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use super::LicenseCatalog;
use crate::error::PipelineError;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static regex is valid"));

/// Normalize free-form text into a slug.
///
/// Diacritics fold to their closest ASCII letter, anything else outside
/// `[a-z0-9]` is dropped or collapsed into a single hyphen.
///
/// ```
/// use husk::core::models::normalize_name;
///
/// assert_eq!(normalize_name(" déjà  vu! "), "deja-vu");
/// assert_eq!(normalize_name("   "), "");
/// ```
#[must_use]
pub fn normalize_name(input: &str) -> String {
    let ascii: String = input.nfkd().filter(char::is_ascii).collect();
    let lowered = ascii.to_ascii_lowercase();
    NON_ALNUM
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// True when `folder` has no entries at all
pub fn is_empty_folder(folder: &Path) -> Result<bool, PipelineError> {
    let mut entries = fs::read_dir(folder).map_err(|e| PipelineError::io(folder, e))?;
    Ok(entries.next().is_none())
}

/// Everything the pipeline needs to know about the new project.
///
/// Built once, then passed read-only through every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSpec {
    /// Repository slug, never empty
    pub name: String,
    /// Name as the user typed it, used for the readme title
    pub title: String,
    /// Free-text description, possibly empty
    pub description: String,
    /// License id from the catalog
    pub license: String,
    /// Existing project folder
    pub folder: PathBuf,
}

impl ProjectSpec {
    /// Validate raw input into a project description
    pub fn new(
        raw_name: &str,
        description: &str,
        license: &str,
        folder: impl Into<PathBuf>,
        catalog: &LicenseCatalog,
    ) -> Result<Self, PipelineError> {
        let name = normalize_name(raw_name);
        if name.is_empty() {
            return Err(PipelineError::Input("Repository name can't be empty.".to_string()));
        }
        if !catalog.contains(license) {
            return Err(PipelineError::Input(format!(
                "`{license}` license is not available."
            )));
        }
        let folder = folder.into();
        if !folder.is_dir() {
            return Err(PipelineError::Input(format!(
                "directory `{}` doesn't exist.",
                folder.display()
            )));
        }

        Ok(Self {
            name,
            title: raw_name.trim().to_string(),
            description: description.trim().to_string(),
            license: license.to_string(),
            folder,
        })
    }
}
