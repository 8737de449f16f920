//! Incremental presenter feed over the roster and catalog views.
//!
//! # Responsibility
//! - Snapshot filtered views into display rows and drip them out in chunks.
//! - Chain the books feed once behind a combined readers refresh.
//! - Debounce book-search input at the feed cadence.
//!
//! # Invariants
//! - A refresh supersedes the in-flight feed for the same target.
//! - The readers→books chain fires at most once per combined refresh and
//!   is skipped when the books view is already loaded.
//! - One `tick` per scheduler beat; the shell sleeps
//!   [`crate::feed::CHUNK_YIELD_MS`] between beats.

use crate::feed::{ChunkFeed, Debouncer, BOOK_SEARCH_DEBOUNCE_TICKS, DEFAULT_CHUNK_SIZE};
use crate::model::book::{Book, BookId};
use crate::model::student::{Student, StudentId};
use crate::search::filter::StudentFilter;
use crate::service::library::Library;

/// Display projection of one roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderRow {
    pub id: StudentId,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub class_label: String,
    pub parallel: String,
    /// Held books joined with `", "`.
    pub books: String,
}

impl From<&Student> for ReaderRow {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            last_name: student.last_name.clone(),
            first_name: student.first_name.clone(),
            middle_name: student.middle_name.clone(),
            class_label: student.class_label.clone(),
            parallel: student.parallel.clone(),
            books: student.books.join(", "),
        }
    }
}

/// Display projection of one catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: BookId,
    pub title: String,
    pub author: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
        }
    }
}

/// Whether a readers refresh should pull the books view behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshScope {
    ReadersOnly,
    ReadersThenBooks,
}

/// Rows emitted by one scheduler beat.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FeedTick {
    pub readers: Vec<ReaderRow>,
    pub books: Vec<BookRow>,
    pub readers_done: bool,
    pub books_done: bool,
}

/// Cooperative feed state for the two table views.
#[derive(Debug)]
pub struct ViewFeeds {
    readers: Option<ChunkFeed<ReaderRow>>,
    books: Option<ChunkFeed<BookRow>>,
    chunk_size: usize,
    readers_loaded: bool,
    books_loaded: bool,
    chain_books: bool,
    book_search: Debouncer,
    book_query: String,
}

impl Default for ViewFeeds {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewFeeds {
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            readers: None,
            books: None,
            chunk_size,
            readers_loaded: false,
            books_loaded: false,
            chain_books: false,
            book_search: Debouncer::new(BOOK_SEARCH_DEBOUNCE_TICKS),
            book_query: String::new(),
        }
    }

    /// Snapshots the filtered roster and restarts the readers feed,
    /// superseding any feed in flight for it.
    pub fn refresh_readers(
        &mut self,
        library: &Library,
        filter: &StudentFilter,
        scope: RefreshScope,
    ) {
        if let Some(feed) = self.readers.as_mut() {
            feed.cancel();
        }
        let rows: Vec<ReaderRow> = library
            .list_students(filter)
            .into_iter()
            .map(ReaderRow::from)
            .collect();
        self.readers = Some(ChunkFeed::begin(rows, self.chunk_size));
        self.readers_loaded = false;
        self.chain_books = matches!(scope, RefreshScope::ReadersThenBooks);
    }

    /// Snapshots the filtered catalog and restarts the books feed.
    pub fn refresh_books(&mut self, library: &Library, query: &str) {
        if let Some(feed) = self.books.as_mut() {
            feed.cancel();
        }
        self.book_query = query.to_string();
        self.book_search.cancel();
        let rows: Vec<BookRow> = library
            .list_books(query)
            .into_iter()
            .map(BookRow::from)
            .collect();
        self.books = Some(ChunkFeed::begin(rows, self.chunk_size));
        self.books_loaded = false;
    }

    /// Registers book-search input; the refresh starts only after the
    /// debounce window passes without another keystroke.
    pub fn request_book_search(&mut self, query: &str) {
        self.book_query = query.to_string();
        self.book_search.trigger();
    }

    /// Stops both feeds; pending continuations become no-ops.
    pub fn cancel_all(&mut self) {
        if let Some(feed) = self.readers.as_mut() {
            feed.cancel();
        }
        if let Some(feed) = self.books.as_mut() {
            feed.cancel();
        }
        self.book_search.cancel();
    }

    /// `(emitted, total)` for the readers status label.
    pub fn readers_progress(&self) -> (usize, usize) {
        self.readers
            .as_ref()
            .map(ChunkFeed::progress)
            .unwrap_or((0, 0))
    }

    /// `(emitted, total)` for the books status label.
    pub fn books_progress(&self) -> (usize, usize) {
        self.books
            .as_ref()
            .map(ChunkFeed::progress)
            .unwrap_or((0, 0))
    }

    /// Advances one scheduler beat: fires a due debounced search, emits at
    /// most one chunk per feed, and chains the books feed when a combined
    /// readers refresh completes.
    pub fn tick(&mut self, library: &Library) -> FeedTick {
        let mut out = FeedTick::default();

        if self.book_search.tick() {
            let query = self.book_query.clone();
            self.refresh_books(library, &query);
        }

        let mut readers_finished = false;
        if let Some(feed) = self.readers.as_mut() {
            if !feed.is_done() {
                let step = feed.next_chunk();
                out.readers = step.emitted.to_vec();
                readers_finished = step.done;
            } else if !self.readers_loaded && !feed.is_cancelled() {
                // Empty snapshot: complete without emitting anything.
                readers_finished = true;
            }
        }
        if readers_finished {
            self.readers_loaded = true;
            out.readers_done = true;
            if self.chain_books && !self.books_loaded {
                let query = self.book_query.clone();
                self.refresh_books(library, &query);
            }
            self.chain_books = false;
        }

        if let Some(feed) = self.books.as_mut() {
            if !feed.is_done() {
                let step = feed.next_chunk();
                out.books = step.emitted.to_vec();
                if step.done {
                    self.books_loaded = true;
                    out.books_done = true;
                }
            } else if !self.books_loaded && !feed.is_cancelled() {
                self.books_loaded = true;
                out.books_done = true;
            }
        }

        out
    }
}
