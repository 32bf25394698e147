//! Top-level directory crawl

use crate::crawler::fetcher::fetch_text;
use crate::crawler::parser::extract_state_entries;
use crate::model::StateEntry;
use crate::HarvestError;
use reqwest::Client;
use url::Url;

/// Discovers the states listed on the directory page
pub struct DirectoryCrawler {
    client: Client,
    directory_url: String,
}

impl DirectoryCrawler {
    pub fn new(client: Client, directory_url: impl Into<String>) -> Self {
        Self {
            client,
            directory_url: directory_url.into(),
        }
    }

    /// Fetches the directory page and returns its states in page order
    ///
    /// Any failure here is fatal: without the directory nothing can be crawled.
    pub async fn discover(&self) -> Result<Vec<StateEntry>, HarvestError> {
        let body = fetch_text(&self.client, &self.directory_url)
            .await
            .map_err(|source| HarvestError::Directory {
                url: self.directory_url.clone(),
                source,
            })?;

        let base = Url::parse(&self.directory_url)?;
        let states = extract_state_entries(&body, &base)?;
        tracing::info!("Directory lists {} states", states.len());

        Ok(states)
    }
}
