//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path component: {0:?}")]
    InvalidComponent(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for poster storage backends
///
/// Files are addressed by `(state, filename)`. Implementations must be safe
/// to call from many tasks at once; two concurrent `store` calls for the same
/// key may both succeed, and the last rename wins.
pub trait Storage: Send + Sync {
    /// Creates the directory for a state if it does not exist yet
    ///
    /// # Returns
    ///
    /// The path of the state directory
    fn prepare_state(&self, state: &str) -> StorageResult<PathBuf>;

    /// Returns the final path a poster is (or would be) stored at
    fn path_for(&self, state: &str, filename: &str) -> StorageResult<PathBuf>;

    /// Checks whether a complete file exists for this key
    ///
    /// Partially written files are never reported as present.
    fn contains(&self, state: &str, filename: &str) -> StorageResult<bool>;

    /// Persists a fully buffered poster
    ///
    /// # Returns
    ///
    /// The final path of the written file
    fn store(&self, state: &str, filename: &str, bytes: &[u8]) -> StorageResult<PathBuf>;
}
