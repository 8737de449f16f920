//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the domain store, persistence adapters and filter engine
//!   into the operations the presentation shell calls.
//! - Keep the shell decoupled from file formats and store internals.

pub mod library;
pub mod promotion;
pub mod view_feed;
