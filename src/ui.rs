//! User interface rendering functions for all application screens.

use std::iter;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    grid::Position,
    types::{LoadMenuItem, Screen, Status},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::LoadMenu(item) => load_menu(app, frame, item),
        Screen::FileDialog => file_dialog(app, frame)?,
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Returns an area of the given size centered within `area`.
///
/// The result is clamped to `area` when it does not fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);

    area
}

/// Renders the load menu with its items and the status of the last load attempt.
///
/// The "Start Game" item is greyed out while no map is loaded. The status line shows the loaded
/// file or the reason the last load failed.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn load_menu(app: &App, frame: &mut Frame, item: LoadMenuItem) {
    clear(frame);

    let menu_height = 5;
    let layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(menu_height),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(frame.area());
    let menu_area = centered(layout[1], 48, menu_height);

    let block = Block::bordered()
        .title("Maze")
        .title_bottom("(j) down / (k) up / (l) select / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(menu_area);
    frame.render_widget(block, menu_area);

    let inner_layout =
        Layout::vertical(vec![Constraint::Max(1); LoadMenuItem::ALL.len()]).split(inner_space);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);
    let disabled_style = Style::default().fg(Color::DarkGray);

    for (idx, entry) in LoadMenuItem::ALL.into_iter().enumerate() {
        let disabled = entry == LoadMenuItem::StartGame && app.grid.is_none();
        let style = match (entry == item, disabled) {
            (true, true) => disabled_style.bg(Color::Green),
            (true, false) => active_content_style,
            (false, true) => disabled_style,
            (false, false) => content_style,
        };

        frame.render_widget(
            Line::styled(entry.label(), style).centered(),
            inner_layout[idx],
        );
    }

    if let Some(status) = &app.status {
        let color = match status {
            Status::Loaded(_) => Color::Green,
            Status::Failed(_) => Color::Red,
        };

        frame.render_widget(
            Line::styled(status.message(), Style::default().fg(color)).centered(),
            layout[3],
        );
    }
}

/// Renders the file dialog with a scrollable list of map files.
///
/// This function displays a viewport containing the files found in the configured directory. It
/// provides scrolling functionality and visual indicators for the entry under the cursor and the
/// file that is currently loaded.
///
/// # Errors
///
/// This function may return errors if the layout cannot be split as expected.
pub(crate) fn file_dialog(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())
    .get(1)
    .copied()
    .ok_or_eyre("failed to get dialog column from layout")?;
    let space = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(space)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get dialog row from layout")?;

    let block = Block::bordered()
        .title_top(format!("Map files (*.{})", app.config.extension))
        .title_bottom("(j) down / (k) up / (l) load / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(space);

    frame.render_widget(block, space);

    app.viewport_height = inner_space.height.into();

    if app.files.is_empty() {
        frame.render_widget(
            Line::raw(format!(
                "No .{} files in {}",
                app.config.extension,
                app.config.dir.display()
            ))
            .centered(),
            inner_space,
        );
        return Ok(());
    }

    let [selector_column, list_column] =
        Layout::horizontal([Constraint::Length(2), Constraint::Fill(1)]).areas(inner_space);
    let selector_rows = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()])
        .split(selector_column);
    let list_rows =
        Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()]).split(list_column);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let loaded = app.grid_name.as_deref();
    let visible = app
        .files
        .iter()
        .enumerate()
        .skip(app.viewport_offset)
        .take(app.viewport_height);

    for (row, (idx, file)) in visible.enumerate() {
        let style = if idx == app.selected {
            active_content_style
        } else {
            content_style
        };
        let is_loaded = file
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| Some(name) == loaded);
        let marker = if is_loaded { DOT } else { " " };

        let selector_area = *selector_rows
            .get(row)
            .ok_or_eyre("failed to get selector row from layout")?;
        let entry_area = *list_rows
            .get(row)
            .ok_or_eyre("failed to get list row from layout")?;

        frame.render_widget(Line::styled(marker, style).centered(), selector_area);
        frame.render_widget(Line::styled(file.key.clone(), style), entry_area);
    }

    Ok(())
}

/// Renders the in-game screen with the maze walls and the player token.
///
/// Walls and the player are drawn on a [`Canvas`], one terminal cell per maze cell. The completion
/// notice is drawn on top of it once the input that completes the maze has been handled.
///
/// # Errors
///
/// This function may return errors if no session is running or from coordinate conversion
/// operations.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = app
        .session
        .as_ref()
        .ok_or_eyre("failed to retrieve running session")?;
    let grid = session.grid();
    let rows = u16::try_from(grid.rows())?;
    let columns = u16::try_from(grid.columns())?;

    // Maze area above, tooltip block at the bottom
    let [maze_content_area, tooltip_full_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(frame.area());

    let space = centered(maze_content_area, columns, rows);
    let [_, tooltip_area, _] = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(columns.max(36)),
        Constraint::Min(1),
    ])
    .areas(tooltip_full_area);

    let wall_coords = transform_maze_to_screen_coords(grid.walls(), rows, columns);
    let player_coords =
        transform_maze_to_screen_coords(iter::once(session.position()), rows, columns);

    let x_extent = half_extent(columns);
    let y_extent = half_extent(rows);
    let maze = Canvas::default()
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .marker(Marker::Block)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &player_coords,
                color: Color::Red,
            });
        });

    frame.render_widget(maze, space);

    let tooltip_block = Block::bordered()
        .title("(arrows) move / (esc) return to menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    if app.notice {
        completion_notice(frame);
    }

    Ok(())
}

/// Renders the notice shown once the maze is completed.
fn completion_notice(frame: &mut Frame) {
    let area = centered(frame.area(), 32, 3);
    let block = Block::bordered()
        .title_bottom("(enter) return")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Green))
        .border_type(BorderType::Rounded);
    let inner_space = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(Line::raw("Maze completed!").centered(), inner_space);
}

/// Returns half the canvas extent along an axis with `cells` cells.
///
/// Points at integer offsets from the center then map onto exactly one terminal cell each. A
/// single cell gets a non-zero extent so the canvas bounds stay valid.
fn half_extent(cells: u16) -> f64 {
    (f64::from(cells.saturating_sub(1)) / 2.).max(0.5)
}

/// Transforms maze coordinates to screen coordinates for canvas rendering.
///
/// This function converts maze positions to canvas points centered on the origin using the
/// formulas: `y = (rows - 1) / 2 - row` for rows (ascending upwards) and
/// `x = column - (columns - 1) / 2` for columns. Positions too large for the terminal are
/// dropped.
pub(crate) fn transform_maze_to_screen_coords<I>(
    positions: I,
    rows: u16,
    columns: u16,
) -> Vec<(f64, f64)>
where
    I: IntoIterator<Item = Position>,
{
    let rows_n = f64::from(rows);
    let cols_n = f64::from(columns);

    positions
        .into_iter()
        .filter_map(|Position { x, y }| {
            let col = f64::from(u16::try_from(x).ok()?);
            let row = f64::from(u16::try_from(y).ok()?);

            Some((col - (cols_n - 1.) / 2., (rows_n - 1.) / 2. - row))
        })
        .collect()
}
