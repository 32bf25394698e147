//! Storage module for persisting downloaded posters
//!
//! This module handles:
//! - The `{files}/{state}/{filename}` layout
//! - Existence checks used for idempotent reruns
//! - Atomic write-then-rename persistence

mod fs;
mod traits;

pub use fs::FsStorage;
pub use traits::{Storage, StorageError, StorageResult};

use std::path::Path;

/// Opens the filesystem storage rooted at `path`
pub fn open_storage(path: &Path) -> StorageResult<FsStorage> {
    FsStorage::new(path)
}

/// Turns a state name or filename into a single safe path component
///
/// Path separators and NUL become `-`. Empty names and `.`/`..` are rejected.
pub fn sanitize_component(name: &str) -> StorageResult<String> {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(StorageError::InvalidComponent(name.to_string()));
    }

    Ok(cleaned)
}
