//! Per-state crawl
//!
//! Fetches a state's index page and fans out one poster fetch per listed
//! poster. Failing to load the index is fatal for the run; a failing poster
//! is just another outcome.

use crate::crawler::fetcher::fetch_text;
use crate::crawler::parser::extract_poster_links;
use crate::crawler::poster::PosterFetcher;
use crate::crawler::scheduler::{Level, Scheduler};
use crate::model::{FetchOutcome, PosterRef, StateEntry};
use crate::HarvestError;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Crawls one state's poster index
pub struct StateCrawler {
    client: Client,
    posters: Arc<PosterFetcher>,
    scheduler: Scheduler,
}

impl StateCrawler {
    pub fn new(client: Client, posters: Arc<PosterFetcher>, scheduler: Scheduler) -> Self {
        Self {
            client,
            posters,
            scheduler,
        }
    }

    /// Lists the posters on a state's index page
    pub async fn discover_posters(&self, entry: &StateEntry) -> Result<Vec<PosterRef>, HarvestError> {
        let body = fetch_text(&self.client, &entry.index_url)
            .await
            .map_err(|source| HarvestError::StateIndex {
                state: entry.name.clone(),
                url: entry.index_url.clone(),
                source,
            })?;

        let base = Url::parse(&entry.index_url)?;
        let posters = extract_poster_links(&body, &base)?
            .into_iter()
            .map(|page_url| PosterRef::new(entry.name.clone(), page_url))
            .collect();

        Ok(posters)
    }

    /// Fetches every poster of a state
    ///
    /// Returns one outcome per scheduled poster, in index-page order.
    pub async fn crawl(&self, entry: &StateEntry) -> Result<Vec<FetchOutcome>, HarvestError> {
        let posters = self.discover_posters(entry).await?;
        tracing::info!("{}: {} posters listed", entry.name, posters.len());

        let fetcher = Arc::clone(&self.posters);
        let results = self
            .scheduler
            .fan_out(Level::Posters, &posters, move |poster| {
                let fetcher = Arc::clone(&fetcher);
                async move { fetcher.fetch(&poster).await }
            })
            .await;

        let outcomes: Vec<FetchOutcome> = results
            .into_iter()
            .map(|result| {
                result.unwrap_or_else(|failure| {
                    FetchOutcome::failed(
                        posters[failure.index].page_url.clone(),
                        vec![format!("task: {}", failure.message)],
                    )
                })
            })
            .collect();

        let saved = outcomes.iter().filter(|o| o.is_saved()).count();
        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        tracing::info!(
            "{}: {} saved, {} skipped, {} failed",
            entry.name,
            saved,
            outcomes.len() - saved - failed,
            failed
        );

        Ok(outcomes)
    }
}
