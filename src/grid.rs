//! Wall map data and the text format it is parsed from.
//!
//! A map file holds one row per line, with cells separated by commas. Each cell is either `0`
//! (floor) or `1` (wall), optionally padded with whitespace.

use std::{
    error::Error,
    fmt,
    num::ParseIntError,
    str::{FromStr, Utf8Error},
};

/// Single cell of a wall map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Passable cell, written as `0`.
    Floor,
    /// Impassable cell, written as `1`.
    Wall,
}

/// Location of a cell in a [`Grid`].
///
/// The `x` coordinate counts columns from the left edge and `y` counts rows from the top edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Position {
    /// Creates a position from a column and a row index.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Largest number of rows or columns a map may have.
///
/// Each maze cell is drawn on one terminal cell, and terminal coordinates are `u16`, so this is
/// `u16::MAX`.
pub(crate) const MAX_EXTENT: usize = 0xffff;

/// Rectangular wall map.
///
/// Cells are stored row-major. A grid always holds at least one row and at least two columns, so
/// the player's starting cell at column 1 of the top row is always inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Cell values, row after row.
    cells: Vec<Cell>,
    /// Number of cells in each row.
    columns: usize,
    /// Number of rows.
    rows: usize,
}

impl Grid {
    /// Returns the number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the cell at the given position, or `None` when it lies outside the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        if position.x >= self.columns || position.y >= self.rows {
            return None;
        }

        self.cells
            .get(position.y * self.columns + position.x)
            .copied()
    }

    /// Returns an iterator over the positions of every wall cell, row by row.
    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, cell)| *cell == Cell::Wall)
            .map(|(index, _)| Position::new(index % self.columns, index / self.columns))
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        let mut columns = None;
        let mut rows = 0;

        let input = input.strip_prefix('\u{feff}').unwrap_or(input);

        for (index, line) in input.lines().enumerate() {
            let line_number = index + 1;
            let mut width = 0;

            for token in line.split(',') {
                let token = token.trim();
                let value = token.parse::<i64>().map_err(|source| {
                    ParseError::new(
                        line_number,
                        ParseErrorKind::InvalidInteger {
                            token: token.to_owned(),
                            source,
                        },
                    )
                })?;
                let cell = match value {
                    0 => Cell::Floor,
                    1 => Cell::Wall,
                    other => {
                        return Err(ParseError::new(
                            line_number,
                            ParseErrorKind::InvalidCell { value: other },
                        ))
                    }
                };

                cells.push(cell);
                width += 1;
            }

            match columns {
                None => columns = Some(width),
                Some(expected) if expected != width => {
                    return Err(ParseError::new(
                        line_number,
                        ParseErrorKind::RaggedRow {
                            expected,
                            found: width,
                        },
                    ));
                }
                Some(_) => {}
            }

            rows += 1;
        }

        let columns = columns.ok_or(ParseError::new(0, ParseErrorKind::Empty))?;
        if columns < 2 {
            return Err(ParseError::new(1, ParseErrorKind::TooNarrow { columns }));
        }
        if columns > MAX_EXTENT || rows > MAX_EXTENT {
            return Err(ParseError::new(0, ParseErrorKind::TooLarge { columns, rows }));
        }

        Ok(Self {
            cells,
            columns,
            rows,
        })
    }
}

/// Failure to parse the text of a map file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// One-based line number the problem was found on, or `0` when it concerns the whole input.
    line: usize,
    /// What went wrong.
    kind: ParseErrorKind,
}

impl ParseError {
    /// Creates a parse error located at the given line.
    pub(crate) const fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    /// Returns the one-based line number of the offending row, or `0` for whole-input problems.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the specific reason the input was rejected.
    #[must_use]
    pub const fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(formatter, "{}", self.kind)
        } else {
            write!(formatter, "line {}: {}", self.line, self.kind)
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidInteger { source, .. } => Some(source),
            ParseErrorKind::InvalidUtf8 { source } => Some(source),
            _ => None,
        }
    }
}

/// Reasons a map file can be rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input has no rows.
    Empty,
    /// A token is not an integer literal.
    InvalidInteger {
        /// The trimmed token.
        token: String,
        /// The underlying integer parsing failure.
        source: ParseIntError,
    },
    /// A token is an integer other than `0` or `1`.
    InvalidCell {
        /// The value found.
        value: i64,
    },
    /// A row has a different number of cells than the first row.
    RaggedRow {
        /// Cell count of the first row.
        expected: usize,
        /// Cell count of the offending row.
        found: usize,
    },
    /// The map has fewer than two columns, which leaves no room for the starting cell.
    TooNarrow {
        /// Cell count of the rows.
        columns: usize,
    },
    /// The map has more rows or columns than can be drawn.
    TooLarge {
        /// Cell count of the rows.
        columns: usize,
        /// Number of rows.
        rows: usize,
    },
    /// The file is not valid UTF-8 text.
    InvalidUtf8 {
        /// The underlying decoding failure.
        source: Utf8Error,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(formatter, "map contains no rows"),
            Self::InvalidInteger { token, .. } => write!(formatter, "`{token}` is not an integer"),
            Self::InvalidCell { value } => {
                write!(formatter, "cell value {value} is neither 0 (floor) nor 1 (wall)")
            }
            Self::RaggedRow { expected, found } => {
                write!(formatter, "expected {expected} cells but found {found}")
            }
            Self::TooNarrow { columns } => {
                write!(formatter, "map is {columns} column wide, at least 2 are required")
            }
            Self::TooLarge { columns, rows } => {
                write!(
                    formatter,
                    "map is {columns}x{rows} cells, at most {MAX_EXTENT} per side are supported"
                )
            }
            Self::InvalidUtf8 { source } => {
                write!(formatter, "file is not valid UTF-8 text: {source}")
            }
        }
    }
}
