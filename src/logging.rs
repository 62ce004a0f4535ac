//! Optional file logging.
//!
//! The terminal belongs to the UI while the game runs, so log records are only emitted when a log
//! file is configured. Filtering follows `RUST_LOG` and defaults to `info`.

use std::{fs::File, path::Path};

use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};

/// Installs a logger writing to `path`, or leaves logging disabled when no path is given.
///
/// # Errors
///
/// This function may return errors if the log file cannot be created or if a logger has already
/// been installed.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}
