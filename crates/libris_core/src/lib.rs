//! Core domain logic for the Libris school-library manager.
//! This crate is the single source of truth for roster, catalog and
//! promotion invariants; presentation shells stay on the other side of
//! the service boundary.

pub mod feed;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use feed::{
    ChunkFeed, Debouncer, FeedStep, BOOK_SEARCH_DEBOUNCE_TICKS, CHUNK_YIELD_MS, DEFAULT_CHUNK_SIZE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, BookValidationError};
pub use model::config::LibraryConfig;
pub use model::student::{Student, StudentId, StudentValidationError};
pub use repo::paths::LibraryPaths;
pub use repo::{RepoError, RepoResult};
pub use search::filter::{filter_books, filter_students, StudentFilter};
pub use service::library::{Library, StoreError, StoreResult};
pub use service::promotion::{
    begin_promotion, AmbiguousStudent, PromotionDecision, PromotionError, PromotionPolicy,
    PromotionResult, PromotionRun,
};
pub use service::view_feed::{BookRow, FeedTick, ReaderRow, RefreshScope, ViewFeeds};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
