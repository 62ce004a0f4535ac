//! Command line configuration.

use std::path::PathBuf;

use clap::Parser;

/// Command line options for the maze walker.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Map file to load at startup.
    #[arg(short, long, value_name = "FILE")]
    pub map: Option<PathBuf>,
    /// Directory listed by the file dialog.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
    /// Extension of the files listed by the file dialog, without the leading dot.
    #[arg(short, long, value_name = "EXT", default_value = "txt")]
    pub extension: String,
    /// Write diagnostic logs to this file. Logging is disabled otherwise.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: None,
            dir: PathBuf::from("."),
            extension: "txt".to_owned(),
            log_file: None,
        }
    }
}
