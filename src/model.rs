//! Data model shared by every crawl level
//!
//! All values are produced once and never mutated afterwards.

use std::fmt;
use std::path::PathBuf;

/// A state listed on the directory page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    /// Visible state name, also used as the storage subdirectory
    pub name: String,

    /// Absolute URL of the state's poster index page
    pub index_url: String,
}

/// A poster page discovered on a state's index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterRef {
    pub state: String,
    pub page_url: String,
}

impl PosterRef {
    pub fn new(state: impl Into<String>, page_url: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            page_url: page_url.into(),
        }
    }
}

/// A downloaded poster, held in memory until it is persisted
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// URL the bytes were fetched from
    pub source_url: String,

    /// Last path segment of `source_url`
    pub filename: String,

    pub bytes: Vec<u8>,
}

impl fmt::Debug for ResolvedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAsset")
            .field("source_url", &self.source_url)
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Terminal result of fetching one poster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file was already on disk; no asset was downloaded
    Skipped(PathBuf),

    /// The file was downloaded and written
    Saved(PathBuf),

    /// Nothing was written
    Failed {
        page_url: String,
        /// One message per attempt, in attempt order
        attempt_errors: Vec<String>,
    },
}

impl FetchOutcome {
    pub fn failed(page_url: impl Into<String>, attempt_errors: Vec<String>) -> Self {
        Self::Failed {
            page_url: page_url.into(),
            attempt_errors,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Path on disk for saved and skipped outcomes
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Skipped(path) | Self::Saved(path) => Some(path),
            Self::Failed { .. } => None,
        }
    }
}
