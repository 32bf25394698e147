//! Harvest coordinator - main run orchestration logic
//!
//! This module wires the crawl levels together:
//! - Building the shared HTTP client, resolver and storage
//! - Discovering states from the directory page
//! - Creating every state directory before any poster is fetched
//! - Fanning out state crawls under the configured policy
//! - Folding every outcome into a [`RunReport`]

use crate::config::Config;
use crate::crawler::directory::DirectoryCrawler;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::index::StateCrawler;
use crate::crawler::poster::PosterFetcher;
use crate::crawler::resolver::LinkResolver;
use crate::crawler::scheduler::{Level, Scheduler, Shutdown};
use crate::model::{FetchOutcome, StateEntry};
use crate::output::RunReport;
use crate::storage::{open_storage, Storage, StorageError};
use crate::HarvestError;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

/// Main harvest coordinator structure
pub struct Harvester {
    config: Arc<Config>,
    storage: Arc<dyn Storage>,
    scheduler: Scheduler,
    directory: DirectoryCrawler,
    states: Arc<StateCrawler>,
}

impl Harvester {
    /// Creates a new harvester instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Client, storage root and resolver are ready
    /// * `Err(HarvestError)` - Failed to initialize
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let storage: Arc<dyn Storage> = Arc::new(open_storage(Path::new(&config.output.files_dir))?);
        Self::with_storage(config, storage)
    }

    /// Creates a harvester that writes into the given storage backend
    pub fn with_storage(config: Config, storage: Arc<dyn Storage>) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.http)?;
        let resolver = Arc::new(LinkResolver::for_site(&config.site)?);
        let scheduler = Scheduler::new(&config.crawler);

        tracing::debug!(
            "Resolver chain: {}",
            resolver.strategy_names().join(" -> ")
        );

        let posters = Arc::new(PosterFetcher::new(
            client.clone(),
            resolver,
            Arc::clone(&storage),
        ));
        let states = Arc::new(StateCrawler::new(
            client.clone(),
            posters,
            scheduler.clone(),
        ));
        let directory = DirectoryCrawler::new(client, config.site.directory_url.clone());

        Ok(Self {
            config: Arc::new(config),
            storage,
            scheduler,
            directory,
            states,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle for stopping the run from outside (e.g. on Ctrl-C)
    pub fn shutdown(&self) -> Shutdown {
        self.scheduler.shutdown().clone()
    }

    /// Lists the states on the directory page without fetching anything else
    pub async fn discover(&self) -> Result<Vec<StateEntry>, HarvestError> {
        self.directory.discover().await
    }

    /// Runs a full harvest
    ///
    /// This is the core logic that:
    /// 1. Discovers states
    /// 2. Creates a directory per state, skipping names that cannot be one
    /// 3. Crawls every state under the configured policy
    /// 4. Collects all poster outcomes
    ///
    /// A failing state index stops new work from being scheduled. In-flight
    /// work finishes, then the first fatal error is returned.
    pub async fn run(&self) -> Result<RunReport, HarvestError> {
        let started_at = Utc::now();
        tracing::info!(
            "Starting harvest from {} ({:?} policy)",
            self.config.site.directory_url,
            self.scheduler.policy()
        );

        let mut states = Vec::new();
        for state in self.discover().await? {
            match self.storage.prepare_state(&state.name) {
                Ok(_) => states.push(state),
                Err(StorageError::InvalidComponent(name)) => {
                    tracing::warn!(
                        "Skipping state {:?} ({}): not usable as a directory name",
                        name,
                        state.index_url
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        let crawler = Arc::clone(&self.states);
        let shutdown = self.shutdown();
        let results = self
            .scheduler
            .fan_out(Level::States, &states, move |entry| {
                let crawler = Arc::clone(&crawler);
                let shutdown = shutdown.clone();
                async move {
                    let result = crawler.crawl(&entry).await;
                    if let Err(e) = &result {
                        tracing::error!("{}", e);
                        shutdown.trigger();
                    }
                    result
                }
            })
            .await;

        let mut outcomes: Vec<FetchOutcome> = Vec::new();
        let mut fatal: Option<HarvestError> = None;

        for (entry, result) in states.iter().zip(results) {
            match result {
                Ok(Ok(state_outcomes)) => outcomes.extend(state_outcomes),
                Ok(Err(e)) => {
                    fatal.get_or_insert(e);
                }
                Err(failure) => {
                    fatal.get_or_insert(HarvestError::TaskFailed(format!(
                        "crawl of {}: {}",
                        entry.name, failure.message
                    )));
                }
            }
        }

        if let Some(e) = fatal {
            let saved = outcomes.iter().filter(|o| o.is_saved()).count();
            tracing::warn!(
                "Harvest aborted after {} posters ({} saved)",
                outcomes.len(),
                saved
            );
            return Err(e);
        }

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            states: states.len(),
            outcomes,
            interrupted: self.scheduler.shutdown().is_triggered(),
        };

        tracing::info!(
            "Harvest completed in {}s: {}",
            report.duration_seconds(),
            report.counts_line()
        );

        Ok(report)
    }
}
