//! Flat-file persistence adapters.
//!
//! # Responsibility
//! - Load and save the three independent stores under the base directory.
//! - Keep file-format details out of the service layer.
//!
//! # Invariants
//! - `load_or_default` never fails: missing files yield defaults, broken
//!   files are logged and yield defaults.
//! - Saves go through a temp file and rename, so readers never observe a
//!   half-written store.
//! - A failed save leaves the previous file contents in place.

use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod book_repo;
pub mod config_repo;
pub mod paths;
pub mod student_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for any of the three stores.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: io::Error },
    Malformed { path: PathBuf, message: String },
}

impl RepoError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access `{}`: {source}", path.display())
            }
            Self::Malformed { path, message } => {
                write!(f, "malformed content in `{}`: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { .. } => None,
        }
    }
}

/// Writes `contents` to `path` via a sibling temp file and rename.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> RepoResult<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(|err| RepoError::io(&tmp, err))?;
    fs::rename(&tmp, path).map_err(|err| RepoError::io(path, err))?;
    Ok(())
}

/// Reads `path` to a string; `Ok(None)` when the file does not exist.
pub(crate) fn read_if_present(path: &Path) -> RepoResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(RepoError::io(path, err)),
    }
}
