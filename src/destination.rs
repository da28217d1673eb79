//! Where a deck is written, and writing it without leaving partial files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::DestinationError;

/// File name the solver expects in its working directory.
pub const DECK_FILE_NAME: &str = "vorlax.in";

/// Root prepended to directories that name neither a drive nor a root.
fn system_root() -> &'static str {
    if cfg!(windows) {
        "C:\\"
    } else {
        "/"
    }
}

/// Source of the destination directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// A directory given directly.
    Directory(String),
    /// A file whose first non-empty line names the directory.
    SideFile(PathBuf),
}

impl Destination {
    /// Resolve the source to an absolute directory.
    ///
    /// # Errors
    ///
    /// See [`resolve_directory`] and [`read_side_file`].
    pub fn resolve(&self) -> Result<PathBuf, DestinationError> {
        match self {
            Destination::Directory(raw) => resolve_directory(raw),
            Destination::SideFile(path) => read_side_file(path),
        }
    }
}

/// Turn a directory string into an absolute path.
///
/// Both `\` and `/` separate components. A leading drive such as `D:` is kept;
/// without one the system root is used, so relative and rooted strings end up
/// in the same place.
///
/// # Errors
///
/// Returns [`DestinationError::EmptyPath`] for a blank string.
///
/// # Examples
/// ```
/// use vlmdeck::resolve_directory;
///
/// let dir = resolve_directory("runs\\vorlax").expect("non-empty");
/// assert!(dir.is_absolute() || cfg!(windows));
/// assert!(dir.ends_with("vorlax"));
/// ```
pub fn resolve_directory(raw: &str) -> Result<PathBuf, DestinationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DestinationError::EmptyPath);
    }

    let (drive, rest) = match raw.as_bytes() {
        [letter, b':', ..] if letter.is_ascii_alphabetic() => raw.split_at(2),
        _ => ("", raw),
    };
    let mut directory = if drive.is_empty() {
        PathBuf::from(system_root())
    } else {
        PathBuf::from(format!("{}{MAIN_SEPARATOR}", drive.to_ascii_uppercase()))
    };
    directory.extend(rest.split(['\\', '/']).filter(|part| !part.is_empty()));
    debug!(raw, directory = %directory.display(), "resolved destination");
    Ok(directory)
}

/// Read the destination directory from the first non-empty line of a file.
///
/// # Errors
///
/// Returns [`DestinationError::Io`] when the file cannot be read and
/// [`DestinationError::EmptySideFile`] when it holds only blank lines.
pub fn read_side_file(path: &Path) -> Result<PathBuf, DestinationError> {
    let text = fs::read_to_string(path).map_err(|source| DestinationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| DestinationError::EmptySideFile(path.to_path_buf()))?;
    resolve_directory(line)
}

/// Write deck text to [`DECK_FILE_NAME`] inside `directory`.
///
/// The text goes to a temporary file in the same directory that replaces the
/// target only once it is complete, so a failed write never leaves a
/// truncated deck behind.
///
/// # Errors
///
/// Returns [`DestinationError::Io`] when the temporary file cannot be created
/// or written, or when it cannot be moved into place.
pub fn write_deck(directory: &Path, text: &str) -> Result<PathBuf, DestinationError> {
    let target = directory.join(DECK_FILE_NAME);
    let io_error = |source| DestinationError::Io {
        path: target.clone(),
        source,
    };

    let mut file = NamedTempFile::new_in(directory).map_err(|source| DestinationError::Io {
        path: directory.to_path_buf(),
        source,
    })?;
    file.write_all(text.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    file.persist(&target)
        .map_err(|persist| io_error(persist.error))?;

    info!(path = %target.display(), bytes = text.len(), "wrote deck");
    Ok(target)
}
