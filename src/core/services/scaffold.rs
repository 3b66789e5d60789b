//! Scaffold writer - project-facing files
//!
//! Each file has its own overwrite policy:
//!
//! | File                    | Policy                         |
//! |-------------------------|--------------------------------|
//! | `readme.md`             | create only, existing is kept  |
//! | `.gitignore`, `LICENSE` | always overwritten from catalog|
//! | `docs/` template tree   | copied only if `docs/` absent  |
//! | `docs/index.md`         | always refreshed from readme   |
//! | `docs/_config.yml`      | create only                    |
//! | `.vscode/settings.json` | always overwritten             |

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::core::models::{LicenseCatalog, ProjectSpec, StepResult, TemplateSet, normalize_name};
use crate::error::PipelineError;
use crate::paths;

/// Writes scaffold files from templates and configured content
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldWriter<'a> {
    templates: &'a TemplateSet,
    catalog: &'a LicenseCatalog,
}

impl<'a> ScaffoldWriter<'a> {
    /// Writer reading from `templates`
    #[must_use]
    pub const fn new(templates: &'a TemplateSet, catalog: &'a LicenseCatalog) -> Self {
        Self { templates, catalog }
    }

    /// Create `readme.md` unless one already exists
    pub fn write_readme(
        &self,
        spec: &ProjectSpec,
        sections: &IndexMap<String, String>,
    ) -> Result<StepResult, PipelineError> {
        let path = spec.folder.join(paths::README_FILE);
        let content = render_readme(spec, sections);

        if create_new(&path, &content)? {
            Ok(StepResult::done(format!(
                "A `{}` file was created in `{}`.",
                paths::README_FILE,
                spec.folder.display()
            )))
        } else {
            Ok(StepResult::skipped(format!(
                "A `{}` file was found. Skipping step.",
                paths::README_FILE
            )))
        }
    }

    /// Copy ignore rules and license text, plus the pages tree when enabled
    pub fn copy_templates(&self, spec: &ProjectSpec, pages: bool) -> Result<StepResult, PipelineError> {
        let folder = &spec.folder;

        if pages {
            let docs = paths::docs_dir(folder);
            if docs.exists() {
                log::debug!("A `/docs` folder was found. Skipping copy.");
            } else {
                copy_tree(&self.templates.docs_dir(), &docs)?;
                log::debug!("A `/docs` folder was copied to `{}`.", folder.display());
            }
        }

        let gitignore = self.templates.gitignore();
        copy_file(&gitignore, &folder.join(paths::GITIGNORE_FILE))?;
        log::debug!("A `{}` file was copied to `{}`.", paths::GITIGNORE_FILE, folder.display());

        let license_src = self.catalog.file(&spec.license).ok_or_else(|| {
            PipelineError::Input(format!("`{}` license is not available.", spec.license))
        })?;
        let license_name = paths::license_file_name(&spec.license);
        copy_file(license_src, &folder.join(license_name))?;
        log::debug!("A `{}` license file was copied to `{}`.", spec.license, folder.display());

        Ok(StepResult::done(format!(
            "Template files were copied to `{}`.",
            folder.display()
        )))
    }

    /// Refresh `docs/index.md` from the readme
    pub fn write_pages_index(&self, spec: &ProjectSpec) -> Result<StepResult, PipelineError> {
        let docs = paths::docs_dir(&spec.folder);
        fs::create_dir_all(&docs).map_err(|e| PipelineError::io(&docs, e))?;
        copy_file(
            &spec.folder.join(paths::README_FILE),
            &docs.join(paths::PAGES_INDEX_FILE),
        )?;
        Ok(StepResult::done(format!(
            "An `{}` file was created in `/{}`.",
            paths::PAGES_INDEX_FILE,
            paths::DOCS_DIR
        )))
    }

    /// Create `docs/_config.yml` unless one already exists
    pub fn write_pages_config(
        &self,
        spec: &ProjectSpec,
        settings: &IndexMap<String, String>,
    ) -> Result<StepResult, PipelineError> {
        let docs = paths::docs_dir(&spec.folder);
        fs::create_dir_all(&docs).map_err(|e| PipelineError::io(&docs, e))?;

        let mut settings = settings.clone();
        settings.insert("description".to_string(), spec.description.clone());
        let content: String = settings
            .iter()
            .map(|(key, value)| format!("{key}: {value}\n"))
            .collect();

        if create_new(&docs.join(paths::PAGES_CONFIG_FILE), &content)? {
            Ok(StepResult::done(format!(
                "A `{}` file was created in `/{}`.",
                paths::PAGES_CONFIG_FILE,
                paths::DOCS_DIR
            )))
        } else {
            Ok(StepResult::skipped(format!(
                "A `{}` file was found. Skipping step.",
                paths::PAGES_CONFIG_FILE
            )))
        }
    }

    /// Overwrite editor settings; the interpreter path may change between runs
    pub fn write_editor_settings(
        &self,
        folder: &Path,
        linter: &str,
        interpreter: &str,
    ) -> Result<StepResult, PipelineError> {
        let settings_path = paths::editor_settings(folder);
        let dir = folder.join(paths::EDITOR_DIR);
        fs::create_dir_all(&dir).map_err(|e| PipelineError::io(&dir, e))?;

        let mut settings: IndexMap<String, Value> = IndexMap::new();
        settings.insert("python.linting.enabled".to_string(), Value::Bool(true));
        settings.insert(format!("python.linting.{linter}Enabled"), Value::Bool(true));
        settings.insert("python.pythonPath".to_string(), Value::String(interpreter.to_string()));

        let content = to_json_four_spaces(&settings)
            .map_err(|e| PipelineError::io(&settings_path, io::Error::other(e)))?;
        fs::write(&settings_path, content).map_err(|e| PipelineError::io(&settings_path, e))?;

        Ok(StepResult::done(format!(
            "A `{}` file was created in `/{}`.",
            paths::EDITOR_SETTINGS_FILE,
            paths::EDITOR_DIR
        )))
    }
}

/// Render the readme for `spec`.
///
/// A `License` section is always present and always last unless the
/// configured sections already name one.
#[must_use]
pub fn render_readme(spec: &ProjectSpec, sections: &IndexMap<String, String>) -> String {
    let mut sections = sections.clone();
    sections.insert(
        "License".to_string(),
        format!("This project is under the {} license.\n\n", spec.license),
    );

    let mut out = format!(
        "<h2 align='center'>{}</h2>\n\n<p align='center'>\n  <i>{}</i>\n</p>\n\n#### Table of contents:\n",
        spec.title, spec.description
    );
    for key in sections.keys() {
        out.push_str(&format!("- [{key}](#{})\n", normalize_name(key)));
    }
    for (key, value) in &sections {
        out.push_str(&format!("\n---\n\n### {key}\n{value}\n"));
    }
    out.push_str(&format!(
        "\n###### This file was generated by `{}/{}`",
        paths::PROGRAM,
        crate::VERSION
    ));
    out
}

/// Write `content` to a new file; `Ok(false)` when the file already exists.
///
/// A directory at `path` is an error, not an existing file.
fn create_new(path: &Path, content: &str) -> Result<bool, PipelineError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(content.as_bytes())
                .map_err(|e| PipelineError::io(path, e))?;
            Ok(true)
        },
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Err(PipelineError::io(
            path,
            io::Error::new(io::ErrorKind::IsADirectory, "a directory is in the way"),
        )),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(PipelineError::io(path, e)),
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<(), PipelineError> {
    fs::copy(from, to).map(|_| ()).map_err(|e| PipelineError::io(from, e))
}

/// Recursively copy `from` into `to`; a missing source yields an empty `to`
fn copy_tree(from: &Path, to: &Path) -> Result<(), PipelineError> {
    if !from.is_dir() {
        log::debug!("No pages template at `{}`.", from.display());
        return fs::create_dir_all(to).map_err(|e| PipelineError::io(to, e));
    }

    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| PipelineError::io(from, io::Error::other(e)))?;
        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| PipelineError::io(&target, e))?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn to_json_four_spaces<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
