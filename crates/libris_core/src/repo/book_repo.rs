//! Book catalog adapter (`books.txt`).
//!
//! # Responsibility
//! - Persist the catalog in its line-based text format.
//! - Tolerate junk lines and optional trailing commas on load.
//!
//! # Invariants
//! - One record per line: `{Title = "<title>", Author = "<author>"}`.
//! - Lines that do not match the grammar are skipped, not errors.
//! - Titles/authors containing a double quote are written verbatim and
//!   produce a line the loader will skip on the next run.

use crate::model::book::Book;
use crate::repo::paths::LibraryPaths;
use crate::repo::{read_if_present, write_atomic, RepoResult};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

static BOOK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{Title\s*=\s*"([^"]+)"\s*,\s*Author\s*=\s*"([^"]+)"\}"#)
        .expect("book line pattern must compile")
});

/// Line-format catalog store.
#[derive(Debug)]
pub struct BookRepository {
    path: PathBuf,
}

impl BookRepository {
    pub fn new(paths: &LibraryPaths) -> Self {
        Self {
            path: paths.books_path(),
        }
    }

    /// Loads the catalog; a missing file yields an empty catalog.
    ///
    /// # Errors
    /// - I/O failures other than absence. Unparseable lines never fail.
    pub fn load(&self) -> RepoResult<Vec<Book>> {
        let Some(contents) = read_if_present(&self.path)? else {
            return Ok(Vec::new());
        };
        Ok(parse_catalog(&contents))
    }

    /// Loads the catalog, substituting an empty catalog on any failure.
    pub fn load_or_default(&self) -> Vec<Book> {
        match self.load() {
            Ok(books) => books,
            Err(err) => {
                error!("event=books_load module=repo status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Overwrites the catalog file atomically, one record per line.
    pub fn save(&self, books: &[Book]) -> RepoResult<()> {
        let mut body = String::new();
        for book in books {
            body.push_str(&format_line(book));
            body.push('\n');
        }
        match write_atomic(&self.path, &body) {
            Ok(()) => {
                info!("event=books_save module=repo status=ok count={}", books.len());
                Ok(())
            }
            Err(err) => {
                error!("event=books_save module=repo status=error error={err}");
                Err(err)
            }
        }
    }
}

fn parse_catalog(contents: &str) -> Vec<Book> {
    contents
        .lines()
        .filter_map(|line| parse_line(line.trim().trim_end_matches(',')))
        .collect()
}

fn parse_line(line: &str) -> Option<Book> {
    let captures = BOOK_LINE.captures(line)?;
    Some(Book::new(&captures[1], &captures[2]))
}

fn format_line(book: &Book) -> String {
    format!("{{Title = \"{}\", Author = \"{}\"}},", book.title, book.author)
}
