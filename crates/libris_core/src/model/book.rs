//! Book catalog record.
//!
//! # Responsibility
//! - Define the catalog entry and its insertion-boundary validation.
//! - Provide the display label used when a student holds a book.
//!
//! # Invariants
//! - `id` is stable for the process lifetime and never persisted.
//! - Duplicate (title, author) pairs are allowed; identity disambiguates.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable process-lifetime identifier for a catalog entry.
pub type BookId = Uuid;

/// Insertion-boundary rejection for a book record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be empty"),
            Self::EmptyAuthor => write!(f, "book author must not be empty"),
        }
    }
}

impl Error for BookValidationError {}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
}

impl Book {
    /// Creates an entry with a generated id. Title and author are trimmed.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into().trim().to_string(),
            author: author.into().trim().to_string(),
        }
    }

    /// Both fields must be non-empty before the entry may join the catalog.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        Ok(())
    }

    /// Display string used for held-book references: `<title> - <author>`.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.title, self.author)
    }
}
