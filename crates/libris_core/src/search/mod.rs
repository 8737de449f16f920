//! Filtering and search over the in-memory store.
//!
//! # Responsibility
//! - Compute visible subsets on demand as pure functions of store + query.
//! - Keep result order identical to store order.

pub mod filter;
