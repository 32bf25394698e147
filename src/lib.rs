//! Poster-Harvest: a labor-law poster downloader
//!
//! This crate walks a poster directory site state by state, resolves each
//! poster page to its PDF through an ordered chain of link-extraction
//! strategies, and stores every PDF once under `files/{state}/{filename}`.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Poster-Harvest operations
///
/// Only the variants raised before or between crawl levels end a run.
/// Per-poster failures never surface here; they are recorded as
/// [`model::FetchOutcome::Failed`].
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Directory fetch failed for {url}: {source}")]
    Directory {
        url: String,
        source: crawler::FetchError,
    },

    #[error("State index fetch failed for {state} ({url}): {source}")]
    StateIndex {
        state: String,
        url: String,
        source: crawler::FetchError,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTML query error: {0}")]
    Query(#[from] crawler::QueryError),

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

impl HarvestError {
    /// Short name of the crawl stage that produced a fatal error
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Directory { .. } => "directory",
            Self::StateIndex { .. } => "state index",
            Self::HttpClient(_) => "http client",
            Self::Storage(_) | Self::Io(_) => "storage",
            Self::UrlParse(_) | Self::Query(_) => "parse",
            Self::TaskFailed(_) => "scheduler",
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Poster-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Harvester;
pub use model::{FetchOutcome, PosterRef, ResolvedAsset, StateEntry};
pub use output::RunReport;
