//! Base-directory file layout.
//!
//! # Responsibility
//! - Resolve the three store files relative to one application base
//!   directory chosen at startup.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const BOOKS_FILE: &str = "books.txt";
pub const STUDENTS_FILE: &str = "students.json";

/// Resolved locations of the three stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    base_dir: PathBuf,
}

impl LibraryPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    pub fn books_path(&self) -> PathBuf {
        self.base_dir.join(BOOKS_FILE)
    }

    pub fn students_path(&self) -> PathBuf {
        self.base_dir.join(STUDENTS_FILE)
    }
}
