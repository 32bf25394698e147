//! Fan-out scheduling for the crawl levels
//!
//! This module handles:
//! - The parallel policy: one tokio task per item, joined as a group
//! - The sequential policy: one item at a time with a delay between posters
//! - Global concurrency limiting via a semaphore
//! - Cooperative shutdown: no new work is scheduled once triggered

use crate::config::{CrawlerConfig, Policy};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;

/// Which crawl level a fan-out belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// One task per state; never throttled, so poster tasks can always make progress
    States,
    /// One task per poster; gated by permits or paced by the delay
    Posters,
}

/// A scheduled task that panicked or was cancelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    /// Index of the item in the fan-out input
    pub index: usize,
    pub message: String,
}

/// Shared stop flag
#[derive(Debug, Clone, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    pub fn trigger(&self) {
        if !self.0.swap(true, Ordering::SeqCst) {
            tracing::warn!("Shutdown requested, no new fetches will be scheduled");
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives fan-out at every crawl level under one policy
#[derive(Debug, Clone)]
pub struct Scheduler {
    policy: Policy,
    poster_delay: Duration,
    permits: Arc<Semaphore>,
    shutdown: Shutdown,
    /// When the last sequential poster fetch finished, across all states
    last_poster: Arc<Mutex<Option<Instant>>>,
}

impl Scheduler {
    /// Creates a scheduler from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            policy: config.policy,
            poster_delay: Duration::from_millis(config.poster_delay_ms),
            permits: Arc::new(Semaphore::new(config.max_concurrent_requests.max(1) as usize)),
            shutdown: Shutdown::default(),
            last_poster: Arc::new(Mutex::new(None)),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    /// Runs `task` once per item and returns every result
    ///
    /// Results come back in input order. Items not yet scheduled when
    /// shutdown is triggered are left out, so the result may be shorter
    /// than `items`. A failing task never cancels its siblings.
    pub async fn fan_out<T, R, F, Fut>(
        &self,
        level: Level,
        items: &[T],
        task: F,
    ) -> Vec<Result<R, TaskFailure>>
    where
        T: Clone + Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
    {
        match self.policy {
            Policy::Parallel => self.run_parallel(level, items, task).await,
            Policy::Sequential => self.run_sequential(level, items, task).await,
        }
    }

    async fn run_parallel<T, R, F, Fut>(
        &self,
        level: Level,
        items: &[T],
        task: F,
    ) -> Vec<Result<R, TaskFailure>>
    where
        T: Clone + Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
    {
        let mut join_set = JoinSet::new();
        let mut scheduled = 0;

        for (index, item) in items.iter().enumerate() {
            if self.shutdown.is_triggered() {
                break;
            }

            let fut = task(item.clone());
            let permits = (level == Level::Posters).then(|| Arc::clone(&self.permits));
            join_set.spawn(async move {
                // Never closed, so acquisition cannot fail
                let _permit = match permits {
                    Some(permits) => permits.acquire_owned().await.ok(),
                    None => None,
                };
                // The inner task keeps a panic paired with its own index
                let result = tokio::spawn(fut).await.map_err(|e| TaskFailure {
                    index,
                    message: join_failure_message(e),
                });
                (index, result)
            });
            scheduled += 1;
        }

        let mut slots: Vec<Option<Result<R, TaskFailure>>> = (0..scheduled).map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    if let Err(failure) = &result {
                        tracing::error!("Fan-out task {} failed: {}", index, failure.message);
                    }
                    slots[index] = Some(result);
                }
                Err(e) => tracing::error!("Fan-out task failed: {}", e),
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    Err(TaskFailure {
                        index,
                        message: "task did not complete".to_string(),
                    })
                })
            })
            .collect()
    }

    async fn run_sequential<T, R, F, Fut>(
        &self,
        level: Level,
        items: &[T],
        task: F,
    ) -> Vec<Result<R, TaskFailure>>
    where
        T: Clone,
        F: Fn(T) -> Fut,
        Fut: Future<Output = R>,
    {
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            if self.shutdown.is_triggered() {
                break;
            }

            if level == Level::Posters {
                self.wait_for_poster_gap().await;
            }

            results.push(Ok(task(item.clone()).await));

            if level == Level::Posters {
                self.mark_poster_finished();
            }
        }

        results
    }

    /// Sleeps until the configured delay has passed since the previous poster
    ///
    /// The previous poster may belong to another state.
    async fn wait_for_poster_gap(&self) {
        if self.poster_delay.is_zero() {
            return;
        }

        let last = *self.last_poster.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(last) = last {
            tokio::time::sleep_until(last + self.poster_delay).await;
        }
    }

    fn mark_poster_finished(&self) {
        *self.last_poster.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
    }
}

/// Describes a task that panicked or was cancelled
fn join_failure_message(error: JoinError) -> String {
    if error.is_cancelled() {
        return "task was cancelled".to_string();
    }

    match error.try_into_panic() {
        Ok(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned());
            match message {
                Some(message) => format!("task panicked: {}", message),
                None => "task panicked".to_string(),
            }
        }
        Err(error) => error.to_string(),
    }
}
