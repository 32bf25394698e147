//! Single-poster download
//!
//! Fetches a poster page, resolves it to a PDF and persists the bytes. Every
//! failure is folded into [`FetchOutcome::Failed`]; nothing propagates past
//! this boundary.

use crate::crawler::fetcher::fetch_text;
use crate::crawler::resolver::{LinkResolver, PosterPage, Resolution};
use crate::model::{FetchOutcome, PosterRef, ResolvedAsset};
use crate::storage::Storage;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Downloads posters into storage
pub struct PosterFetcher {
    client: Client,
    resolver: Arc<LinkResolver>,
    storage: Arc<dyn Storage>,
}

impl PosterFetcher {
    pub fn new(client: Client, resolver: Arc<LinkResolver>, storage: Arc<dyn Storage>) -> Self {
        Self {
            client,
            resolver,
            storage,
        }
    }

    /// Fetches one poster and returns its terminal outcome
    ///
    /// The existence check runs once the candidate filename is known and
    /// before the asset is requested, so a rerun downloads nothing that is
    /// already on disk.
    pub async fn fetch(&self, poster: &PosterRef) -> FetchOutcome {
        let page_url = match Url::parse(&poster.page_url) {
            Ok(url) => url,
            Err(e) => {
                return self.failed(poster, vec![format!("invalid page URL: {}", e)]);
            }
        };

        let body = match fetch_text(&self.client, page_url.as_str()).await {
            Ok(body) => body,
            Err(e) => return self.failed(poster, vec![format!("page fetch: {}", e)]),
        };

        let page = PosterPage {
            url: page_url,
            body,
        };

        let resolution = self
            .resolver
            .resolve(&self.client, &page, |filename| {
                self.is_stored(&poster.state, filename)
            })
            .await;

        match resolution {
            Ok(Resolution::Fetched(asset)) => self.persist(poster, asset).await,
            Ok(Resolution::AlreadyStored { filename, .. }) => {
                match self.storage.path_for(&poster.state, &filename) {
                    Ok(path) => {
                        tracing::debug!("Already have {}", path.display());
                        FetchOutcome::Skipped(path)
                    }
                    Err(e) => self.failed(poster, vec![format!("storage: {}", e)]),
                }
            }
            Err(e) => {
                tracing::warn!("{}", e);
                for message in e.messages() {
                    tracing::warn!("  {}", message);
                }
                FetchOutcome::failed(poster.page_url.clone(), e.messages())
            }
        }
    }

    fn is_stored(&self, state: &str, filename: &str) -> bool {
        match self.storage.contains(state, filename) {
            Ok(present) => present,
            Err(e) => {
                tracing::warn!("Existence check failed for {}/{}: {}", state, filename, e);
                false
            }
        }
    }

    /// Writes a fully buffered asset off the async runtime
    async fn persist(&self, poster: &PosterRef, asset: ResolvedAsset) -> FetchOutcome {
        let storage = Arc::clone(&self.storage);
        let state = poster.state.clone();
        let source_url = asset.source_url.clone();

        let written = tokio::task::spawn_blocking(move || {
            storage.store(&state, &asset.filename, &asset.bytes)
        })
        .await;

        match written {
            Ok(Ok(path)) => {
                tracing::info!("Saved {} from {}", path.display(), source_url);
                FetchOutcome::Saved(path)
            }
            Ok(Err(e)) => self.failed(poster, vec![format!("storage: {}", e)]),
            Err(e) => self.failed(poster, vec![format!("storage task: {}", e)]),
        }
    }

    fn failed(&self, poster: &PosterRef, attempt_errors: Vec<String>) -> FetchOutcome {
        tracing::warn!(
            "Poster {} ({}) failed: {}",
            poster.page_url,
            poster.state,
            attempt_errors.join("; ")
        );
        FetchOutcome::failed(poster.page_url.clone(), attempt_errors)
    }
}
