//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use log::debug;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    session::Direction,
    types::{LoadMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches key presses to [`handle_key`]. It uses a
/// timeout to avoid blocking the UI. Key releases and repeats reported by some terminals are
/// ignored.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    Ok(())
}

/// Dispatches a single key press to the handler of the current screen.
///
/// The `q` key quits from every screen.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return;
    }

    match app.screen {
        Screen::LoadMenu(item) => handle_load_menu(app, item, code),
        Screen::FileDialog => handle_file_dialog(app, code),
        Screen::InGame => handle_in_game(app, code),
    }
}

/// Handles key presses on the load menu.
///
/// The `j`/`k` keys and the arrow keys move the cursor and `l` or Enter activates the item under
/// it.
fn handle_load_menu(app: &mut App, item: LoadMenuItem, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::LoadMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::LoadMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            LoadMenuItem::LoadMap => {
                app.refresh_files();
                app.screen = Screen::FileDialog;
            }
            LoadMenuItem::StartGame => {
                if !app.start() {
                    debug!("start requested without a loaded map");
                }
            }
            LoadMenuItem::Quit => app.exit = true,
        },
        _ => {}
    }
}

/// Handles key presses on the file dialog.
///
/// Moving the cursor past the edges of the viewport scrolls it. Selecting an entry loads it and
/// returns to the load menu, with the cursor on "Start Game" when the load succeeded.
fn handle_file_dialog(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.selected + 1 < app.files.len() {
                app.selected += 1;
            }
            let height = app.viewport_height.max(1);
            if app.selected >= app.viewport_offset + height {
                app.viewport_offset = app.selected + 1 - height;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected = app.selected.saturating_sub(1);
            if app.selected < app.viewport_offset {
                app.viewport_offset = app.selected;
            }
        }
        KeyCode::Char('l') | KeyCode::Enter => {
            let Some(path) = app.files.get(app.selected).map(|file| file.path.clone()) else {
                return;
            };
            let item = if app.load(&path) {
                LoadMenuItem::StartGame
            } else {
                LoadMenuItem::LoadMap
            };
            app.screen = Screen::LoadMenu(item);
        }
        KeyCode::Char('h') | KeyCode::Esc => {
            app.screen = Screen::LoadMenu(LoadMenuItem::LoadMap);
        }
        _ => {}
    }
}

/// Handles key presses on the in-game screen.
///
/// While the maze is being played, the arrow keys steer the player and Esc abandons the session.
/// Once it is completed, movement is inert and Enter, Esc, `h` or `l` close the session.
fn handle_in_game(app: &mut App, code: KeyCode) {
    let won = app.session.as_ref().is_some_and(|session| session.is_won());

    match code {
        KeyCode::Up if !won => app.steer(Direction::Up),
        KeyCode::Down if !won => app.steer(Direction::Down),
        KeyCode::Left if !won => app.steer(Direction::Left),
        KeyCode::Right if !won => app.steer(Direction::Right),
        KeyCode::Esc => app.close_session(),
        KeyCode::Enter | KeyCode::Char('h' | 'l') if won => app.close_session(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        config::Config,
        file_loader::{tests::scratch_dir, MapFile},
        grid::Position,
        types::Status,
    };

    fn app_with_map(map: &str) -> App {
        let mut app = App::default();
        app.grid = Some(map.parse().expect("map should parse"));
        app
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            handle_key(app, *code);
        }
    }

    #[test]
    fn test_quit_from_any_screen() {
        for screen in [
            Screen::LoadMenu(LoadMenuItem::StartGame),
            Screen::FileDialog,
            Screen::InGame,
        ] {
            let mut app = App::default();
            app.screen = screen;

            handle_key(&mut app, KeyCode::Char('q'));

            assert!(app.exit, "q should quit from {screen:?}");
        }
    }

    #[test]
    fn test_load_menu_navigation() {
        let mut app = App::default();

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Down]);
        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::Quit));

        press(&mut app, &[KeyCode::Up]);
        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::StartGame));

        press(&mut app, &[KeyCode::Char('k'), KeyCode::Char('k')]);
        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::LoadMap));
    }

    #[test]
    fn test_quit_item_exits() {
        let mut app = App::default();
        app.screen = Screen::LoadMenu(LoadMenuItem::Quit);

        handle_key(&mut app, KeyCode::Enter);

        assert!(app.exit);
    }

    #[test]
    fn test_start_disabled_without_map() {
        let mut app = App::default();
        app.screen = Screen::LoadMenu(LoadMenuItem::StartGame);

        handle_key(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::StartGame));
        assert!(app.session.is_none());
    }

    #[test]
    fn test_file_dialog_loads_selected_file() {
        let dir = scratch_dir("events-dialog");
        fs::write(dir.join("a.txt"), "0,0\nbad,0").expect("failed to write map");
        fs::write(dir.join("b.txt"), "0,0,0\n0,0,0").expect("failed to write map");
        let mut app = App::new(Config {
            dir,
            ..Config::default()
        });

        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::FileDialog);
        assert_eq!(app.files.len(), 2);

        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::LoadMap));
        assert!(matches!(app.status, Some(Status::Failed(_))));

        press(&mut app, &[KeyCode::Enter, KeyCode::Char('j'), KeyCode::Enter]);
        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::StartGame));
        assert_eq!(app.status, Some(Status::Loaded("b.txt".to_owned())));
        assert_eq!(app.grid.as_ref().map(crate::Grid::columns), Some(3));
    }

    #[test]
    fn test_file_dialog_scrolls_viewport() {
        let mut app = App::default();
        app.screen = Screen::FileDialog;
        app.viewport_height = 2;
        app.files = (0..4)
            .map(|index| MapFile {
                key: format!("map{index}"),
                path: format!("map{index}.txt").into(),
            })
            .collect();

        press(&mut app, &[KeyCode::Down, KeyCode::Down]);
        assert_eq!(app.selected, 2);
        assert_eq!(app.viewport_offset, 1);

        press(&mut app, &[KeyCode::Down, KeyCode::Down]);
        assert_eq!(app.selected, 3, "cursor should stop at the last file");
        assert_eq!(app.viewport_offset, 2);

        press(&mut app, &[KeyCode::Up, KeyCode::Up, KeyCode::Up]);
        assert_eq!(app.selected, 0);
        assert_eq!(app.viewport_offset, 0);
    }

    #[test]
    fn test_file_dialog_empty_and_back() {
        let mut app = App::default();
        app.screen = Screen::FileDialog;

        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.screen, Screen::FileDialog);
        assert_eq!(app.selected, 0);

        handle_key(&mut app, KeyCode::Char('h'));
        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::LoadMap));
    }

    #[test]
    fn test_play_until_completed() {
        let mut app = app_with_map("0,0,0,0\n0,1,0,0\n0,0,0,0\n0,0,0,0");
        app.screen = Screen::LoadMenu(LoadMenuItem::StartGame);

        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::InGame);

        // Blocked by the wall below the start cell.
        handle_key(&mut app, KeyCode::Down);
        assert_eq!(
            app.session.as_ref().map(|session| session.position()),
            Some(Position::new(1, 0))
        );

        press(&mut app, &[KeyCode::Right, KeyCode::Right]);
        assert!(app.session.as_ref().is_some_and(|session| session.is_won()));

        // Movement is inert once the maze is completed.
        press(&mut app, &[KeyCode::Left, KeyCode::Char('j')]);
        assert_eq!(
            app.session.as_ref().map(|session| session.position()),
            Some(Position::new(3, 0))
        );
        assert_eq!(app.screen, Screen::InGame);

        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::StartGame));
        assert!(app.session.is_none());
        assert!(app.grid.is_some());
    }

    #[test]
    fn test_escape_abandons_session() {
        let mut app = app_with_map("0,0,0\n0,0,0\n0,0,0");
        assert!(app.start());

        press(&mut app, &[KeyCode::Enter, KeyCode::Char('h')]);
        assert_eq!(app.screen, Screen::InGame, "only Esc leaves an unfinished maze");

        handle_key(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::LoadMenu(LoadMenuItem::StartGame));
        assert!(app.session.is_none());
        assert!(app.grid.is_some());
    }
}
