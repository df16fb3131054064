// src/scheduler/mod.rs

//! Update scheduling.
//!
//! One long-lived task sweeps all known sources sequentially, refreshing
//! each and pausing between sources and between cycles. A failing source
//! is marked broken and the sweep continues; no refresh failure ever
//! stops the cycle. Freshly created sources get an immediate one-off
//! refresh on a spawned task, serialized against the background cycle by
//! a per-source guard.

mod guard;

pub use guard::RefreshGuard;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::extract;
use crate::fetch::ContentFetcher;
use crate::models::{SchedulerConfig, Source, SourceId};
use crate::storage::ChannelStore;

/// Summary of one cycle over all sources.
#[derive(Debug)]
pub struct CycleOutcome {
    pub refreshed: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives perpetual refresh cycles over all known sources.
pub struct UpdateScheduler {
    store: Arc<dyn ChannelStore>,
    fetcher: Arc<dyn ContentFetcher>,
    config: SchedulerConfig,
    guard: RefreshGuard,
}

impl UpdateScheduler {
    pub fn new(
        store: Arc<dyn ChannelStore>,
        fetcher: Arc<dyn ContentFetcher>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            config,
            guard: RefreshGuard::new(),
        }
    }

    /// Run cycles for the lifetime of the process. Never returns.
    pub async fn run(self: Arc<Self>) {
        loop {
            let outcome = self.run_cycle().await;
            log::info!(
                "cycle finished: {} refreshed, {} failed ({}s)",
                outcome.refreshed,
                outcome.failed,
                (outcome.finished_at - outcome.started_at).num_seconds()
            );
            tokio::time::sleep(Duration::from_secs(self.config.cycle_delay_secs)).await;
        }
    }

    /// One pass over the source list snapshotted at the start.
    ///
    /// Sources added mid-cycle are picked up next cycle.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let started_at = Utc::now();
        let sources = match self.store.list_sources().await {
            Ok(sources) => sources,
            Err(e) => {
                log::error!("listing sources failed: {}", e);
                Vec::new()
            }
        };

        let mut refreshed = 0;
        let mut failed = 0;
        for source in &sources {
            log::info!("start update for source {} ({})", source.id, source.name);
            match self.refresh_source(source).await {
                Ok(count) => {
                    refreshed += 1;
                    log::info!("source {} refreshed with {} items", source.id, count);
                }
                Err(e) => {
                    failed += 1;
                    self.record_failure(source.id, &e).await;
                }
            }
            tokio::time::sleep(Duration::from_secs(self.config.source_delay_secs)).await;
        }

        CycleOutcome {
            refreshed,
            failed,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Fetch, extract, and store one source's items.
    ///
    /// Items are replaced only on success; a failed fetch or extraction
    /// leaves the previously stored items in place. Runs for the same
    /// source are serialized: a concurrent request waits for the running
    /// one to finish.
    pub async fn refresh_source(&self, source: &Source) -> Result<usize> {
        let _running = self.guard.acquire(source.id).await;

        let rule = source.rule.compile()?;
        let content = self.fetcher.fetch(&source.address).await?;
        let items = extract::extract(&content, &rule)?;
        let count = items.len();
        self.store.replace_items(source.id, items).await?;
        Ok(count)
    }

    /// Spawn an immediate refresh for one source, concurrent with the
    /// background cycle. Used to populate a freshly created source.
    pub fn spawn_refresh(self: &Arc<Self>, id: SourceId) {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            let source = match scheduler.store.get_source(id).await {
                Ok(source) => source,
                Err(e) => {
                    log::error!("refresh for source {} aborted: {}", id, e);
                    return;
                }
            };
            match scheduler.refresh_source(&source).await {
                Ok(count) => log::info!("source {} populated with {} items", id, count),
                Err(e) => scheduler.record_failure(id, &e).await,
            }
        });
    }

    async fn record_failure(&self, id: SourceId, error: &AppError) {
        log::error!("updating source {} failed: {}", id, error);
        if let Err(e) = self.store.mark_broken(id).await {
            log::error!("marking source {} as broken failed: {}", id, e);
        } else {
            log::info!("source {} marked as broken", id);
        }
    }
}
