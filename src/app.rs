//! Core application state and logic for the maze game.

use std::path::Path;

use color_eyre::eyre::Result;
use log::{debug, info, warn};
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    file_loader::{self, LoadError, MapFile},
    grid::Grid,
    session::{Direction, MazeSession},
    types::{LoadMenuItem, Screen, Status},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Command line options the application was started with.
    pub(crate) config: Config,
    /// Currently loaded maze, if any.
    ///
    /// This field is `None` until a map loads successfully and while a session is being played,
    /// since the session owns the grid for its duration.
    pub(crate) grid: Option<Grid>,
    /// File name of the loaded maze.
    pub(crate) grid_name: Option<String>,
    /// Result of the last load attempt.
    pub(crate) status: Option<Status>,
    /// Session being played on the in-game screen.
    pub(crate) session: Option<MazeSession>,
    /// Whether the completion notice is shown.
    ///
    /// This field is raised by the input that completes the maze and lowered when the session is
    /// closed.
    pub(crate) notice: bool,
    /// Map files listed by the file dialog.
    ///
    /// This field is refreshed from the configured directory every time the dialog is opened.
    pub(crate) files: Vec<MapFile>,
    /// Index into [`files`](App::files) of the entry under the cursor.
    pub(crate) selected: usize,
    /// Scrolling offset for the file list viewport.
    ///
    /// This field holds the offset by which to scroll the sliding window into the
    /// [`files`](App::files) vector in the file dialog's viewport.
    pub(crate) viewport_offset: usize,
    /// Height of the file list rendering area.
    ///
    /// This field holds the height of the area in which the list of files is being rendered as a
    /// measure of terminal cells during the last redraw of the on-screen frame.
    pub(crate) viewport_height: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    /// Creates a new instance of the App structure from the command line options.
    ///
    /// When a map is given in the options it is loaded right away. A failure to do so is reported
    /// on the load menu's status line rather than returned.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let preload = config.map.clone();
        let mut app = Self {
            exit: false,
            screen: Screen::LoadMenu(LoadMenuItem::LoadMap),
            config,
            grid: None,
            grid_name: None,
            status: None,
            session: None,
            notice: false,
            files: Vec::new(),
            selected: 0,
            viewport_offset: 0,
            viewport_height: 0,
        };

        if let Some(path) = preload {
            if app.load(&path) {
                app.screen = Screen::LoadMenu(LoadMenuItem::StartGame);
            }
        }

        app
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Loads the map at `path` and records the outcome on the status line.
    ///
    /// A file that cannot be read leaves any previously loaded map in place. A file that is read
    /// but fails to parse clears it, so the game cannot be started until a valid map is loaded.
    /// Returns whether the map was loaded.
    pub(crate) fn load(&mut self, path: &Path) -> bool {
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

        match file_loader::load_map(path) {
            Ok(grid) => {
                self.grid = Some(grid);
                self.grid_name = Some(name.clone());
                self.status = Some(Status::Loaded(name));
                true
            }
            Err(err @ LoadError::FileAccess { .. }) => {
                warn!("{err}");
                self.status = Some(Status::Failed(err.to_string()));
                false
            }
            Err(err @ LoadError::Parse { .. }) => {
                warn!("{err}");
                self.grid = None;
                self.grid_name = None;
                self.status = Some(Status::Failed(err.to_string()));
                false
            }
        }
    }

    /// Refreshes the file dialog's list from the configured directory.
    ///
    /// A directory that cannot be listed leaves the list empty and is reported on the status
    /// line.
    pub(crate) fn refresh_files(&mut self) {
        self.files = match file_loader::fetch_files(&self.config.dir, &self.config.extension) {
            Ok(files) => files,
            Err(err) => {
                warn!("failed to list {}: {err}", self.config.dir.display());
                self.status = Some(Status::Failed(format!(
                    "cannot list {}: {err}",
                    self.config.dir.display()
                )));
                Vec::new()
            }
        };
        self.selected = 0;
        self.viewport_offset = 0;
    }

    /// Starts a session on the loaded map.
    ///
    /// The grid moves into the session. Returns `false` without changing anything when no map is
    /// loaded.
    pub(crate) fn start(&mut self) -> bool {
        let Some(grid) = self.grid.take() else {
            return false;
        };

        self.session = Some(MazeSession::new(grid));
        self.screen = Screen::InGame;
        true
    }

    /// Forwards a direction input to the running session.
    ///
    /// Raises the completion notice when this input completes the maze.
    pub(crate) fn steer(&mut self, direction: Direction) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.handle_direction(direction).completed {
            debug!("showing completion notice");
            self.notice = true;
        }
    }

    /// Ends the running session and takes the grid back so it can be played again.
    pub(crate) fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            if !session.is_won() {
                info!("session abandoned");
            }
            self.grid = Some(session.into_grid());
        }
        self.notice = false;
        self.screen = Screen::LoadMenu(LoadMenuItem::StartGame);
    }
}
