//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to inspect a library base directory and
//!   verify `libris_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use libris_core::{Library, LibraryPaths};

fn main() {
    let base_dir = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let library = Library::open(LibraryPaths::new(&base_dir));

    println!("libris_core version={}", libris_core::core_version());
    println!("base_dir={base_dir}");
    println!(
        "classes={} parallels={}",
        library.config().classes.len(),
        library.config().parallels.len()
    );
    println!(
        "students={} books={}",
        library.students().len(),
        library.books().len()
    );
}
