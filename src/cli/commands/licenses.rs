//! List installed license templates

use husk::core::models::{LicenseCatalog, TemplateSet};
use husk::output::{LicenseList, OutputMode};
use husk::paths;

/// Print the license ids `husk new` accepts
pub fn licenses(mode: OutputMode) -> anyhow::Result<()> {
    let catalog = LicenseCatalog::load(&TemplateSet::new(paths::templates_dir()));
    LicenseList {
        licenses: catalog.ids().map(str::to_string).collect(),
    }
    .render(mode);
    Ok(())
}
