//! Terminal maze walker.
//!
//! Maps are plain text files with one row per line and comma-separated cells, where `0` is floor
//! and `1` is wall. The player starts at column 1 of the top row and is steered with the arrow
//! keys until reaching the bottom row or the rightmost column.
//!
//! [`Grid`] parses map text, [`load_map`] reads it from disk and [`MazeSession`] runs the
//! movement rules. [`App`] wraps them in a Ratatui interface.

mod app;
mod config;
mod events;
mod file_loader;
mod grid;
mod logging;
mod session;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
pub use file_loader::{load_map, LoadError};
pub use grid::{Cell, Grid, ParseError, ParseErrorKind, Position};
pub use logging::init as init_logging;
pub use session::{Direction, MazeSession, MoveOutcome, SessionState};
