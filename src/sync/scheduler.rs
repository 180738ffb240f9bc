use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::app::{FeedsyncError, Result};
use crate::domain::{FeedItem, FeedSource};
use crate::fetcher::Fetcher;
use crate::store::Store;
use crate::sync::persister::{PersistOutcome, Persister};
use crate::sync::projector::project;
use crate::sync::registry::SourceRegistry;
use crate::sync::shutdown::Shutdown;

/// Counters for one pass over the cached sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub sources: usize,
    pub sources_failed: usize,
    pub created: usize,
    pub duplicates: usize,
    pub items_failed: usize,
    pub elapsed: Duration,
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sources, {} new items, {} already stored, {} errors ({:.1}s)",
            self.sources,
            self.created,
            self.duplicates,
            self.sources_failed + self.items_failed,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Drives the fetch, project and persist loop over every registered source.
///
/// Sources are processed one after another. Nothing that goes wrong inside a
/// pass stops the loop: failures are logged and the pass moves on to the
/// next item or source.
pub struct SyncScheduler {
    registry: SourceRegistry,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    persister: Persister,
    fetch_timeout: Duration,
    shutdown: Arc<Shutdown>,
}

impl SyncScheduler {
    pub fn new(
        store: Arc<dyn Store + Send + Sync>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            registry: SourceRegistry::new(store.clone()),
            fetcher,
            persister: Persister::new(store),
            fetch_timeout,
            shutdown: Arc::new(Shutdown::new()),
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Handle for stopping [`run`](Self::run) from another task.
    pub fn shutdown_handle(&self) -> Arc<Shutdown> {
        self.shutdown.clone()
    }

    /// Poll forever, sleeping `period` after each complete pass.
    ///
    /// Returns once the shutdown handle is triggered. The signal is checked
    /// between sources and interrupts the sleep; a fetch already in flight
    /// runs to completion (or to its timeout).
    pub async fn run(&self, period: Duration) -> Result<()> {
        if period.is_zero() {
            return Err(FeedsyncError::Config(
                "sync period must be greater than zero".into(),
            ));
        }
        if self.fetch_timeout.is_zero() {
            return Err(FeedsyncError::Config(
                "fetch timeout must be greater than zero".into(),
            ));
        }

        info!(period_ms = period.as_millis() as u64, "Feed sync started");
        self.registry.refresh();

        while !self.shutdown.is_triggered() {
            let report = self.run_pass().await;
            info!("Sync pass complete: {}", report);

            if self.shutdown.is_triggered() {
                break;
            }

            self.registry.refresh();

            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = self.shutdown.wait() => break,
            }
        }

        info!("Feed sync stopped");
        Ok(())
    }

    /// One sequential sweep over the current source snapshot.
    pub async fn run_pass(&self) -> PassReport {
        let start = Instant::now();
        let sources = self.registry.current();
        let mut report = PassReport::default();

        for source in sources.iter() {
            if self.shutdown.is_triggered() {
                debug!("Shutdown requested, ending pass early");
                break;
            }
            self.sync_source(source, &mut report).await;
        }

        report.elapsed = start.elapsed();
        report
    }

    async fn sync_source(&self, source: &FeedSource, report: &mut PassReport) {
        report.sources += 1;

        let items = match self.fetch(source).await {
            Ok(items) => items,
            Err(e) => {
                report.sources_failed += 1;
                warn!(source_id = source.id, url = %source.url, error = %e, "Skipping source for this pass");
                return;
            }
        };

        debug!(source_id = source.id, items = items.len(), "Fetched source");

        for item in &items {
            let payload = project(item, &source.rule);

            match self.persister.persist(source.id, &item.title, &payload) {
                Ok(PersistOutcome::Created) => report.created += 1,
                Ok(PersistOutcome::AlreadyIngested) => report.duplicates += 1,
                Err(e) => {
                    report.items_failed += 1;
                    warn!(
                        source_id = source.id,
                        title = item.display_title(),
                        error = %e,
                        "Failed to store news item"
                    );
                }
            }
        }
    }

    async fn fetch(&self, source: &FeedSource) -> Result<Vec<FeedItem>> {
        match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(&source.url)).await {
            Ok(result) => result,
            Err(_) => Err(FeedsyncError::FetchTimeout(self.fetch_timeout)),
        }
    }
}
