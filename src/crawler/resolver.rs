//! Poster link resolution
//!
//! A poster page hides its PDF behind one of several markup conventions.
//! [`LinkResolver`] holds an ordered list of [`LinkStrategy`] values and
//! tries them strictly in order:
//!
//! 1. locate a candidate URL in the page
//! 2. derive the filename from that URL
//! 3. stop without downloading if the file is already stored
//! 4. download the asset
//!
//! A failure in any step is a [`StrategyError`] for that strategy only, and
//! the next strategy is tried. The first success wins. When every strategy
//! fails the caller gets a [`ResolutionError`] with one entry per attempt.
//!
//! Adding a markup convention means adding a strategy to the list, not
//! changing the control flow.

use crate::config::SiteConfig;
use crate::crawler::fetcher::{fetch_bytes, FetchError};
use crate::crawler::parser::{attr, find_text_parent, select_first, QueryError};
use crate::model::ResolvedAsset;
use crate::url::{
    filename_from_url, is_root_relative, is_viewer_url, qualify_root_relative, resolve_link,
    unwrap_viewer_url,
};
use reqwest::Client;
use scraper::Html;
use std::fmt;
use std::future::Future;
use thiserror::Error;
use url::Url;

/// Label text next to the direct PDF link
pub const ORIGINAL_POSTER_LABEL: &str = "Original poster PDF";

/// Failure of a single strategy
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("invalid candidate URL '{href}': {reason}")]
    InvalidUrl { href: String, reason: String },

    #[error("viewer link {0} has no target url parameter")]
    ViewerWithoutTarget(String),

    #[error("cannot derive a filename from {0}")]
    NoFilename(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// One failed attempt within a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptError {
    /// Position of the strategy in the chain
    pub index: usize,
    pub strategy: &'static str,
    pub message: String,
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempt {} ({}): {}",
            self.index, self.strategy, self.message
        )
    }
}

/// Every strategy failed for a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no strategy resolved a poster link for {page_url} ({} attempts)", .attempts.len())]
pub struct ResolutionError {
    pub page_url: String,
    pub attempts: Vec<AttemptError>,
}

impl ResolutionError {
    /// Rendered attempt messages, in attempt order
    pub fn messages(&self) -> Vec<String> {
        self.attempts.iter().map(ToString::to_string).collect()
    }
}

/// A poster page as fetched, before parsing
#[derive(Debug, Clone)]
pub struct PosterPage {
    pub url: Url,
    pub body: String,
}

/// Successful result of [`LinkResolver::resolve`]
#[derive(Debug)]
pub enum Resolution {
    /// The asset was downloaded
    Fetched(ResolvedAsset),

    /// A file with the resolved name is already stored; nothing was downloaded
    AlreadyStored { source_url: String, filename: String },
}

impl Resolution {
    pub fn filename(&self) -> &str {
        match self {
            Self::Fetched(asset) => &asset.filename,
            Self::AlreadyStored { filename, .. } => filename,
        }
    }
}

/// A link-extraction heuristic
///
/// Implementations only inspect the document; fetching is done by the
/// resolver.
pub trait LinkStrategy: Send + Sync {
    /// Short name used in logs and attempt errors
    fn name(&self) -> &'static str;

    /// Finds the candidate PDF URL in a parsed poster page
    fn locate(&self, document: &Html, page_url: &Url) -> Result<Url, StrategyError>;
}

/// Follows the anchor next to an "Original poster PDF" label
///
/// Finds the first text node containing the label, moves to its parent
/// element, and takes the first `<a href>` inside it.
#[derive(Debug, Clone)]
pub struct LabeledTextStrategy {
    label: String,
}

impl LabeledTextStrategy {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for LabeledTextStrategy {
    fn default() -> Self {
        Self::new(ORIGINAL_POSTER_LABEL)
    }
}

impl LinkStrategy for LabeledTextStrategy {
    fn name(&self) -> &'static str {
        "labeled-text"
    }

    fn locate(&self, document: &Html, page_url: &Url) -> Result<Url, StrategyError> {
        let label = find_text_parent(document, |text| text.contains(self.label.as_str()))?;
        let anchor = select_first(label, "a")?;
        let href = attr(anchor, "href")?;

        resolve_link(href, page_url).ok_or_else(|| StrategyError::InvalidUrl {
            href: href.to_string(),
            reason: "not an http(s) link".to_string(),
        })
    }
}

/// Reads the `src` of an `<object><iframe>` embed
///
/// Root-relative paths are qualified against the site origin. Viewer
/// redirects are unwrapped to the document they point at.
#[derive(Debug, Clone)]
pub struct EmbeddedViewerStrategy {
    base_url: Url,
    viewer_url: Url,
}

impl EmbeddedViewerStrategy {
    pub fn new(base_url: Url, viewer_url: Url) -> Self {
        Self {
            base_url,
            viewer_url,
        }
    }
}

impl LinkStrategy for EmbeddedViewerStrategy {
    fn name(&self) -> &'static str {
        "embedded-viewer"
    }

    fn locate(&self, document: &Html, page_url: &Url) -> Result<Url, StrategyError> {
        let iframe = select_first(document.root_element(), "object iframe")?;
        let src = attr(iframe, "src")?.trim();

        let invalid = |e: url::ParseError| StrategyError::InvalidUrl {
            href: src.to_string(),
            reason: e.to_string(),
        };

        let url = if is_root_relative(src) {
            qualify_root_relative(src, &self.base_url).map_err(invalid)?
        } else {
            page_url.join(src).map_err(invalid)?
        };

        if is_viewer_url(&url, &self.viewer_url) {
            return unwrap_viewer_url(&url)
                .ok_or_else(|| StrategyError::ViewerWithoutTarget(url.to_string()));
        }

        Ok(url)
    }
}

/// Tries `attempt` on each item in order and returns the first success
///
/// Failures are collected with their index. If nothing succeeds the full
/// list is returned.
pub async fn first_success<'a, S, T, E, F, Fut>(
    items: &'a [S],
    mut attempt: F,
) -> Result<T, Vec<(usize, E)>>
where
    F: FnMut(usize, &'a S) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut failures = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match attempt(index, item).await {
            Ok(value) => return Ok(value),
            Err(e) => failures.push((index, e)),
        }
    }
    Err(failures)
}

/// Ordered chain of link strategies
pub struct LinkResolver {
    strategies: Vec<Box<dyn LinkStrategy>>,
}

impl fmt::Debug for LinkResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkResolver")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

impl LinkResolver {
    pub fn new(strategies: Vec<Box<dyn LinkStrategy>>) -> Self {
        Self { strategies }
    }

    /// Builds the default chain: labeled text first, then embedded viewer
    pub fn for_site(site: &SiteConfig) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(&site.base_url)?;
        let viewer_url = Url::parse(&site.viewer_url)?;

        Ok(Self::new(vec![
            Box::new(LabeledTextStrategy::default()),
            Box::new(EmbeddedViewerStrategy::new(base_url, viewer_url)),
        ]))
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolves a poster page to its PDF
    ///
    /// `is_stored` is asked about each candidate filename before its asset
    /// is downloaded; returning true ends resolution with
    /// [`Resolution::AlreadyStored`].
    pub async fn resolve<F>(
        &self,
        client: &Client,
        page: &PosterPage,
        is_stored: F,
    ) -> Result<Resolution, ResolutionError>
    where
        F: Fn(&str) -> bool + Sync,
    {
        let is_stored = &is_stored;

        first_success(&self.strategies, |index, strategy| async move {
            let result = attempt(strategy.as_ref(), client, page, is_stored).await;
            match &result {
                Ok(resolution) => tracing::debug!(
                    "Strategy {} ({}) resolved {} to {}",
                    index,
                    strategy.name(),
                    page.url,
                    resolution.filename()
                ),
                Err(e) => tracing::debug!(
                    "Strategy {} ({}) failed for {}: {}",
                    index,
                    strategy.name(),
                    page.url,
                    e
                ),
            }
            result
        })
        .await
        .map_err(|failures| ResolutionError {
            page_url: page.url.to_string(),
            attempts: failures
                .into_iter()
                .map(|(index, e)| AttemptError {
                    index,
                    strategy: self.strategies[index].name(),
                    message: e.to_string(),
                })
                .collect(),
        })
    }
}

/// Parses the page and runs one strategy's lookup
///
/// Kept synchronous so the parsed document never lives across an await.
fn locate_candidate(strategy: &dyn LinkStrategy, page: &PosterPage) -> Result<Url, StrategyError> {
    let document = Html::parse_document(&page.body);
    strategy.locate(&document, &page.url)
}

async fn attempt<F>(
    strategy: &dyn LinkStrategy,
    client: &Client,
    page: &PosterPage,
    is_stored: &F,
) -> Result<Resolution, StrategyError>
where
    F: Fn(&str) -> bool + Sync,
{
    let url = locate_candidate(strategy, page)?;
    let filename =
        filename_from_url(&url).ok_or_else(|| StrategyError::NoFilename(url.to_string()))?;

    if is_stored(filename.as_str()) {
        return Ok(Resolution::AlreadyStored {
            source_url: url.to_string(),
            filename,
        });
    }

    let bytes = fetch_bytes(client, url.as_str()).await?;
    Ok(Resolution::Fetched(ResolvedAsset {
        source_url: url.to_string(),
        filename,
        bytes,
    }))
}
