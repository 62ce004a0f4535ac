//! File loading utilities for maze map files.

use std::{
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{OptionExt as _, Result};
use log::{debug, info};

use crate::grid::{Grid, ParseError, ParseErrorKind};

/// Candidate map file offered by the file dialog.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MapFile {
    /// Display name of the map.
    ///
    /// This field holds the file name with its extension stripped.
    pub(crate) key: String,
    /// Location of the file on disk.
    pub(crate) path: PathBuf,
}

/// Reads and parses a map file.
///
/// # Errors
///
/// - [`LoadError::FileAccess`] if the file cannot be read.
/// - [`LoadError::Parse`] if its contents are not a valid map.
pub fn load_map(path: &Path) -> Result<Grid, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::FileAccess {
        path: path.to_owned(),
        source,
    })?;

    let grid = decode(&bytes)
        .and_then(str::parse::<Grid>)
        .map_err(|source| LoadError::Parse {
            path: path.to_owned(),
            source,
        })?;
    info!(
        "loaded {}x{} map from {}",
        grid.columns(),
        grid.rows(),
        path.display()
    );

    Ok(grid)
}

/// Decodes the raw contents of a map file.
///
/// Invalid UTF-8 is reported on the line holding the first offending byte.
fn decode(bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(|source| {
        let valid = bytes.get(..source.valid_up_to()).unwrap_or_default();
        let line = valid.iter().filter(|&&byte| byte == b'\n').count() + 1;

        ParseError::new(line, ParseErrorKind::InvalidUtf8 { source })
    })
}

/// Scans a directory for files with the given extension.
///
/// This function lists the regular files in `dir` whose extension matches `extension`, which is
/// given without the leading dot. The returned entries are sorted by key. Nothing is parsed here;
/// a file is only validated once the user picks it.
///
/// # Errors
///
/// This function may return errors if the directory or one of its entries cannot be read, or if
/// a matching file name is not valid UTF-8.
pub(crate) fn fetch_files(dir: &Path, extension: &str) -> Result<Vec<MapFile>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir()
            || path.extension().and_then(|ext| ext.to_str()) != Some(extension)
        {
            continue;
        }

        let key = path
            .file_stem()
            .ok_or_eyre("failed to retrieve file stem")?
            .to_str()
            .ok_or_eyre("failed to convert osstring to string slice")?
            .to_owned();
        files.push(MapFile { key, path });
    }

    files.sort();
    debug!(
        "found {} .{extension} files in {}",
        files.len(),
        dir.display()
    );

    Ok(files)
}

/// Failure to load a map file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    FileAccess {
        /// File that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },
    /// The file was read but does not hold a valid map.
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// The parsing failure.
        source: ParseError,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess { path, source } => {
                write!(formatter, "cannot read {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(formatter, "invalid map in {}: {source}", path.display())
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FileAccess { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
