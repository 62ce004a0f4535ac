//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Map loading menu.
    ///
    /// This variant represents the first screen, from which a map is loaded and the game started.
    LoadMenu(LoadMenuItem),
    /// File selection screen.
    ///
    /// This variant represents the list of map files found in the configured directory.
    FileDialog,
    /// In-game maze screen.
    ///
    /// This variant represents the screen where the maze is displayed and walked through.
    InGame,
}

/// Load menu navigation options.
///
/// This enumeration holds the different items in the load menu, in the order they are displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoadMenuItem {
    /// "Load Map" menu option, which opens the file dialog.
    LoadMap,
    /// "Start Game" menu option.
    ///
    /// This option does nothing until a map has been loaded.
    StartGame,
    /// "Quit" menu option.
    Quit,
}

impl LoadMenuItem {
    /// All items, in display order.
    pub(crate) const ALL: [Self; 3] = [Self::LoadMap, Self::StartGame, Self::Quit];

    /// Returns the label rendered for the item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::LoadMap => "Load Map",
            Self::StartGame => "Start Game",
            Self::Quit => "Quit",
        }
    }

    /// Returns the item below this one, stopping at the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::LoadMap => Self::StartGame,
            Self::StartGame | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, stopping at the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::LoadMap | Self::StartGame => Self::LoadMap,
            Self::Quit => Self::StartGame,
        }
    }
}

/// Outcome of the last load attempt, shown under the load menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    /// A map was loaded. Holds the file name.
    Loaded(String),
    /// Loading failed. Holds the message shown to the user.
    Failed(String),
}

impl Status {
    /// Returns the text rendered for the status.
    pub(crate) fn message(&self) -> String {
        match self {
            Self::Loaded(name) => format!("File loaded: {name}"),
            Self::Failed(reason) => format!("Failed to load file: {reason}"),
        }
    }
}
