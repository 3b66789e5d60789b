//! One-time template setup

use std::time::Duration;

use husk::adapters::ReqwestGateway;
use husk::core::services::{SetupTargets, TemplateFetcher, run_setup};
use husk::error::PipelineError;
use husk::output::{ConsoleReporter, OutputMode, SetupResult};
use husk::{logging, paths};

/// Fetch templates and write the starter configuration
pub fn setup(verbose: bool, mode: OutputMode) -> anyhow::Result<()> {
    logging::init(&paths::log_file(chrono::Local::now()), verbose)?;
    log::info!("{} {} setup started", paths::PROGRAM, husk::VERSION);

    let config = super::config_or_default()?;
    let gateway = ReqwestGateway::new(Duration::from_secs(config.http_timeout_secs))
        .map_err(PipelineError::from)?;
    let fetcher = TemplateFetcher::new(&gateway, &config.api_url);
    let targets = SetupTargets::standard();

    let steps = run_setup(
        &fetcher,
        &targets,
        &config.gitignore_template,
        &mut ConsoleReporter::new(mode),
    )?;

    SetupResult {
        templates_dir: targets.templates.root().to_path_buf(),
        config_file: targets.config_file,
        steps,
    }
    .render(mode);
    Ok(())
}
