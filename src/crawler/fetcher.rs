//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with the configured user agent
//! - GET requests for HTML pages
//! - GET requests for fully buffered binary assets
//! - Error classification

use crate::config::HttpConfig;
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;

/// A failed request
///
/// A response is "ok" iff its status is 2xx. Everything else, including
/// timeouts, refused connections and TLS failures, is an error.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// The HTTP status, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// One client is built per run and shared by every task so connections are
/// pooled.
///
/// # Example
///
/// ```no_run
/// use poster_harvest::config::HttpConfig;
/// use poster_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and rejects non-success statuses
async fn get_ok(client: &Client, url: &str) -> Result<Response, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::transport(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// Fetches a page and returns its body as text
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, FetchError> {
    tracing::trace!("GET {}", url);
    let response = get_ok(client, url).await?;
    response
        .text()
        .await
        .map_err(|e| FetchError::transport(url, e))
}

/// Fetches an asset and buffers the entire body in memory
///
/// Nothing is written anywhere until the full body has arrived, so a
/// dropped connection never produces a truncated file.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    tracing::trace!("GET {} (asset)", url);
    let response = get_ok(client, url).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::transport(url, e))?;
    Ok(bytes.to_vec())
}
