//! Bootstrap a new project

use std::time::Duration;

use husk::adapters::{KeyringStore, ReqwestGateway, SystemRunner, TerminalInput};
use husk::config::Config;
use husk::core::models::{LicenseCatalog, TemplateSet};
use husk::core::services::{
    Bootstrap, Fallback, PasswordPrompt, ProjectArgs, StoredToken, collect_project, confirm,
};
use husk::error::PipelineError;
use husk::output::{ConsoleReporter, OutputMode};
use husk::{logging, paths};

/// Collect the project, confirm it, then run every step
pub fn new_project(
    args: ProjectArgs,
    assume_yes: bool,
    verbose: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let log_file = paths::log_file(chrono::Local::now());
    logging::init(&log_file, verbose)?;
    log::info!("{} {} started", paths::PROGRAM, husk::VERSION);

    let config = Config::load()?;
    let templates = TemplateSet::new(paths::templates_dir());
    let catalog = LicenseCatalog::load(&templates);
    let runner = SystemRunner;
    let gateway = ReqwestGateway::new(Duration::from_secs(config.http_timeout_secs))
        .map_err(PipelineError::from)?;
    let bootstrap = Bootstrap::new(&config, &templates, &catalog, &runner, &gateway)?;

    let cwd = std::env::current_dir().map_err(|e| PipelineError::io(".", e))?;
    let mut input = TerminalInput::stdio();
    let spec = collect_project(&args, &cwd, &catalog, &mut input)?;
    confirm(&spec, &mut input, assume_yes)?;

    if mode == OutputMode::Human {
        println!("\nStarting...\n");
    }
    let mut credentials = Fallback::new(
        StoredToken::new(KeyringStore::for_api(&config.api_url)),
        PasswordPrompt::new(&mut input),
    );
    let mut summary = bootstrap.run(&spec, &mut credentials, &mut ConsoleReporter::new(mode))?;
    summary.log_file = Some(log_file);
    log::info!("Work successfully finished!");
    summary.render(mode);
    Ok(())
}
