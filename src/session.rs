//! Movement and win state machine for a single play-through of a maze.

use log::{debug, info};

use crate::grid::{Cell, Grid, Position};

/// Cell the player occupies when a session starts.
pub(crate) const START: Position = Position::new(1, 0);

/// Direction of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top row.
    Up,
    /// Towards the bottom row.
    Down,
    /// Towards the leftmost column.
    Left,
    /// Towards the rightmost column.
    Right,
}

/// Progress of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// The player has not yet reached the bottom row or the rightmost column.
    #[default]
    Playing,
    /// The player has reached the bottom row or the rightmost column. No further input is
    /// processed.
    Won,
}

/// Result of resolving one direction input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The player's position changed.
    pub moved: bool,
    /// This input finished the maze.
    ///
    /// Only set on the input that causes the transition to [`SessionState::Won`].
    pub completed: bool,
}

/// A loaded maze together with the player's position in it.
///
/// The session takes ownership of the [`Grid`] it is built from and hands it back through
/// [`MazeSession::into_grid`] once play is over.
#[derive(Debug)]
pub struct MazeSession {
    /// Maze being played.
    grid: Grid,
    /// Player position, always inside the grid.
    position: Position,
    /// Whether the maze has been completed.
    state: SessionState,
}

impl MazeSession {
    /// Starts a session on the given grid with the player at column 1 of the top row.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        info!(
            "starting session on a {}x{} maze",
            grid.columns(),
            grid.rows()
        );

        Self {
            grid,
            position: START,
            state: SessionState::Playing,
        }
    }

    /// Resolves one direction input.
    ///
    /// The player steps one cell in `direction`, clamped to the grid edges, unless the target cell
    /// is a wall. Afterwards, whether or not the player moved, the session is won if the player
    /// stands on the bottom row or the rightmost column. Only the coordinates are compared for
    /// this, never the cell value. Inputs after the session is won are ignored.
    pub fn handle_direction(&mut self, direction: Direction) -> MoveOutcome {
        if self.state == SessionState::Won {
            debug!("ignoring {direction:?} on a completed maze");
            return MoveOutcome::default();
        }

        let candidate = self.step(direction);
        let moved =
            candidate != self.position && self.grid.get(candidate) == Some(Cell::Floor);
        if moved {
            self.position = candidate;
        }
        debug!(
            "{direction:?}: candidate ({}, {}), moved: {moved}",
            candidate.x, candidate.y
        );

        let completed = self.position.x == self.grid.columns() - 1
            || self.position.y == self.grid.rows() - 1;
        if completed {
            self.state = SessionState::Won;
            info!(
                "maze completed at ({}, {})",
                self.position.x, self.position.y
            );
        }

        MoveOutcome { moved, completed }
    }

    /// Returns the cell one step away from the player, clamped to the grid edges.
    fn step(&self, direction: Direction) -> Position {
        let Position { x, y } = self.position;

        match direction {
            Direction::Up => Position::new(x, y.saturating_sub(1)),
            Direction::Down => Position::new(x, (y + 1).min(self.grid.rows() - 1)),
            Direction::Left => Position::new(x.saturating_sub(1), y),
            Direction::Right => Position::new((x + 1).min(self.grid.columns() - 1), y),
        }
    }

    /// Returns the maze being played.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player's current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the session's progress.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` once the maze has been completed.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.state == SessionState::Won
    }

    /// Ends the session and returns the grid it was played on.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn new_session(map: &str) -> MazeSession {
        MazeSession::new(map.parse().expect("test map should parse"))
    }

    #[test]
    fn test_new_session_starts_playing_at_start() {
        let session = new_session("0,0,0\n0,0,0\n0,0,0");

        assert_eq!(session.position(), Position::new(1, 0));
        assert_eq!(session.state(), SessionState::Playing);
        assert!(!session.is_won());
    }

    #[test]
    fn test_move_right_onto_last_column_wins() {
        let mut session = new_session("0,0,0\n0,1,0\n0,0,0");

        let outcome = session.handle_direction(Direction::Right);

        assert_eq!(
            outcome,
            MoveOutcome {
                moved: true,
                completed: true
            }
        );
        assert_eq!(session.position(), Position::new(2, 0));
        assert!(session.is_won());
    }

    #[test]
    fn test_wall_blocks_move() {
        let mut session = new_session("0,0,0,0\n0,1,0,0\n0,0,0,0\n0,0,0,0");

        let outcome = session.handle_direction(Direction::Down);

        assert!(!outcome.moved, "wall should block the move");
        assert!(!outcome.completed);
        assert_eq!(session.position(), Position::new(1, 0));
    }

    #[test]
    fn test_floor_move_commits_candidate() {
        let mut session = new_session("0,0,0,0\n0,0,0,0\n0,0,0,0\n0,0,0,0");

        assert!(session.handle_direction(Direction::Down).moved);
        assert_eq!(session.position(), Position::new(1, 1));
        assert!(session.handle_direction(Direction::Left).moved);
        assert_eq!(session.position(), Position::new(0, 1));
        assert!(session.handle_direction(Direction::Up).moved);
        assert_eq!(session.position(), Position::new(0, 0));
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn test_move_past_edge_is_clamped() {
        let mut session = new_session("0,0,0\n0,0,0\n0,0,0");

        let outcome = session.handle_direction(Direction::Up);

        assert!(!outcome.moved, "moving up from the top row should be a no-op");
        assert_eq!(session.position(), Position::new(1, 0));
    }

    #[test]
    fn test_start_on_last_column_wins_even_when_blocked() {
        // The start cell (1, 0) is a wall and already sits on the last column.
        for direction in [Direction::Right, Direction::Up, Direction::Down] {
            let mut session = new_session("0,1\n0,0");

            let outcome = session.handle_direction(direction);

            assert!(outcome.completed, "{direction:?} should complete the maze");
            assert!(session.is_won());
        }
    }

    #[test]
    fn test_move_left_off_last_column_does_not_win() {
        let mut session = new_session("0,1\n0,0");

        let outcome = session.handle_direction(Direction::Left);

        assert!(outcome.moved);
        assert!(!outcome.completed);
        assert_eq!(session.position(), Position::new(0, 0));
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn test_blocked_move_off_boundary_does_not_win() {
        let mut session = new_session("0,0,0\n0,0,0\n0,1,0");

        let outcome = session.handle_direction(Direction::Down);
        assert!(outcome.moved);
        assert!(!outcome.completed);

        // The wall sits on the bottom row but the player never reaches it.
        let outcome = session.handle_direction(Direction::Down);
        assert!(!outcome.moved);
        assert!(!outcome.completed);
        assert_eq!(session.position(), Position::new(1, 1));
    }

    #[test]
    fn test_completion_is_signalled_once() {
        let mut session = new_session("0,0,0\n0,0,0\n0,0,0");

        assert!(session.handle_direction(Direction::Right).completed);

        for direction in DIRECTIONS {
            let outcome = session.handle_direction(direction);
            assert_eq!(outcome, MoveOutcome::default());
        }
        assert_eq!(session.position(), Position::new(2, 0));
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn test_single_row_wins_on_first_input() {
        let mut session = new_session("0,0,0,0");

        let outcome = session.handle_direction(Direction::Left);

        assert!(outcome.moved);
        assert!(outcome.completed, "every cell of a single row map is on the bottom row");
    }

    #[test]
    fn test_position_never_leaves_grid() {
        let grid: Grid = "0,0,0,0,0\n0,1,0,1,0\n0,0,0,0,0\n0,1,0,1,0\n0,0,0,0,0\n0,0,0,0,0"
            .parse()
            .expect("test map should parse");
        let rows = grid.rows();
        let columns = grid.columns();

        // Walk every fixed sequence of three inputs from the start. Completion must happen exactly
        // when the player first ends an input on the last row or column.
        for first in DIRECTIONS {
            for second in DIRECTIONS {
                for third in DIRECTIONS {
                    let mut session = MazeSession::new(grid.clone());
                    for direction in [first, second, third] {
                        let before = session.position();
                        let was_won = session.is_won();
                        let outcome = session.handle_direction(direction);
                        let after = session.position();
                        let on_boundary = after.x == columns - 1 || after.y == rows - 1;

                        assert!(after.x < columns && after.y < rows, "left the grid");
                        assert_eq!(outcome.moved, before != after);
                        if outcome.moved {
                            assert_eq!(grid.get(after), Some(Cell::Floor));
                        }
                        if was_won {
                            assert_eq!(outcome, MoveOutcome::default());
                        } else {
                            assert_eq!(outcome.completed, on_boundary);
                        }
                        assert_eq!(session.is_won(), was_won || on_boundary);
                    }
                }
            }
        }
    }

    #[test]
    fn test_into_grid_returns_grid() {
        let grid: Grid = "0,0\n0,0".parse().expect("test map should parse");
        let session = MazeSession::new(grid.clone());

        assert_eq!(session.grid(), &grid);
        assert_eq!(session.into_grid(), grid);
    }
}
