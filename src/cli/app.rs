//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use husk::core::services::StepFailure;
use husk::error::PipelineError;
use husk::output::{FailureReport, OutputMode};

use super::commands;

/// husk - Bootstrap a new project, locally and on GitHub
#[derive(Parser, Debug)]
#[command(
    name = "husk",
    version,
    about = "Bootstrap a new project, locally and on GitHub",
    long_about = "Scaffold a readme, license and ignore file, create a pipenv environment,\n\
                  commit, create and push the GitHub repository, and optionally enable pages.\n\n\
                  Run `husk setup` once before the first project."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bootstrap a new project
    New {
        /// Project folder (defaults to the current directory)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// Repository name
        #[arg(short, long)]
        name: Option<String>,

        /// Repository description
        #[arg(short, long)]
        description: Option<String>,

        /// Project license
        #[arg(short, long)]
        license: Option<String>,

        /// Skip the confirmation question
        #[arg(short = 'y', long = "yes")]
        assume_yes: bool,
    },

    /// List installed license templates
    Licenses,

    /// Download templates and write the starter configuration
    Setup,

    /// Manage the OAuth token in the system credential manager
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum TokenAction {
    /// Store a token for a GitHub user
    Store {
        /// GitHub username
        username: String,
    },

    /// Delete the stored token of a GitHub user
    Delete {
        /// GitHub username
        username: String,
    },
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let output_mode = OutputMode::from_json_flag(cli.json);

    let result = match cli.command {
        Some(Command::New {
            folder,
            name,
            description,
            license,
            assume_yes,
        }) => commands::new_project(
            husk::core::services::ProjectArgs {
                folder,
                name,
                description,
                license,
            },
            assume_yes,
            cli.verbose,
            output_mode,
        ),
        Some(Command::Licenses) => commands::licenses(output_mode),
        Some(Command::Setup) => commands::setup(cli.verbose, output_mode),
        Some(Command::Token { action }) => commands::token(action, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": husk::VERSION
                    })
                );
            } else {
                println!("husk v{}", husk::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": husk::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("husk v{}", husk::VERSION);
                println!("\nRun 'husk --help' for usage");
                println!("Run 'husk setup' to get started");
            }
            Ok(())
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report_failure(&err, output_mode)),
    }
}

/// Print `err` and pick the exit code for its failure class
fn report_failure(err: &anyhow::Error, mode: OutputMode) -> u8 {
    let report = if let Some(failure) = err.downcast_ref::<StepFailure>() {
        FailureReport::from(failure)
    } else if let Some(error) = err.downcast_ref::<PipelineError>() {
        if matches!(error, PipelineError::Cancelled) && mode == OutputMode::Human {
            eprintln!("Cancelling...");
            return error.exit_code();
        }
        log::error!("{error}");
        FailureReport::from(error)
    } else {
        log::error!("{err:#}");
        FailureReport {
            success: false,
            step: None,
            message: format!("{err:#}"),
            detail: None,
            exit_code: 1,
            completed: Vec::new(),
        }
    };
    report.render(mode);
    report.exit_code
}
