//! File logging
//!
//! Each run appends to its own timestamped file under `~/.config/husk/logs/`.
//! The terminal stays reserved for step status lines.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Initialise the global logger, writing to `log_file`.
///
/// `verbose` lowers the default filter to `debug`; `RUST_LOG` still wins.
pub fn init(log_file: &Path, verbose: bool) -> anyhow::Result<()> {
    if let Some(dir) = log_file.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let default_level = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}
