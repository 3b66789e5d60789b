//! Template files and the license catalog built from them

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Read-only template tree populated by `husk setup`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    root: PathBuf,
}

impl TemplateSet {
    /// Template tree rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the template directory exists at all
    #[must_use]
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Default ignore file
    #[must_use]
    pub fn gitignore(&self) -> PathBuf {
        self.root.join(paths::GITIGNORE_FILE)
    }

    /// Pages template tree
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(paths::DOCS_DIR)
    }

    /// Directory holding one subfolder per license
    #[must_use]
    pub fn licenses_dir(&self) -> PathBuf {
        self.root.join("licenses")
    }

    /// License text for `license`
    #[must_use]
    pub fn license_file(&self, license: &str) -> PathBuf {
        self.licenses_dir()
            .join(license)
            .join(paths::license_file_name(license))
    }
}

/// License id to template file, read-only during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseCatalog {
    entries: BTreeMap<String, PathBuf>,
}

impl LicenseCatalog {
    /// Scan `templates/licenses/`; each subfolder is one license.
    ///
    /// A missing licenses directory yields an empty catalog.
    #[must_use]
    pub fn load(templates: &TemplateSet) -> Self {
        let entries = fs::read_dir(templates.licenses_dir())
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .map(|entry| {
                let id = entry.file_name().to_string_lossy().to_string();
                let file = templates.license_file(&id);
                (id, file)
            })
            .collect();
        Self { entries }
    }

    /// Build a catalog from explicit entries
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PathBuf>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Whether `license` is available
    #[must_use]
    pub fn contains(&self, license: &str) -> bool {
        self.entries.contains_key(license)
    }

    /// Template file for `license`
    #[must_use]
    pub fn file(&self, license: &str) -> Option<&Path> {
        self.entries.get(license).map(PathBuf::as_path)
    }

    /// Available ids, sorted
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// True when no license templates are installed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
