//! Crawler module for poster discovery and download
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with a shared, configured client
//! - Typed HTML queries and the page selector contracts
//! - Poster link resolution through an ordered strategy chain
//! - Directory, state and poster crawl levels
//! - Parallel and sequential fan-out scheduling

mod coordinator;
mod directory;
mod fetcher;
mod index;
mod parser;
mod poster;
mod resolver;
mod scheduler;

pub use coordinator::Harvester;
pub use directory::DirectoryCrawler;
pub use fetcher::{build_http_client, fetch_bytes, fetch_text, FetchError};
pub use index::StateCrawler;
pub use parser::{
    extract_poster_links, extract_state_entries, find_text_parent, select_first, QueryError,
    POSTER_LINK_SELECTOR, STATE_TABLE_MARKER,
};
pub use poster::PosterFetcher;
pub use resolver::{
    first_success, AttemptError, EmbeddedViewerStrategy, LabeledTextStrategy, LinkResolver,
    LinkStrategy, PosterPage, Resolution, ResolutionError, StrategyError, ORIGINAL_POSTER_LABEL,
};
pub use scheduler::{Level, Scheduler, Shutdown, TaskFailure};
