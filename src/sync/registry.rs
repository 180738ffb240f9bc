use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::domain::FeedSource;
use crate::store::Store;

/// Cached list of pollable sources.
///
/// The cache only ever moves from one complete snapshot to another. A failed
/// or empty read from storage leaves the previous snapshot in place.
pub struct SourceRegistry {
    store: Arc<dyn Store + Send + Sync>,
    cache: RwLock<Arc<[FeedSource]>>,
}

impl SourceRegistry {
    pub fn new(store: Arc<dyn Store + Send + Sync>) -> Self {
        Self {
            store,
            cache: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Reload sources from storage. Returns true when the cache was replaced.
    pub fn refresh(&self) -> bool {
        let records = match self.store.list_sources() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Failed to list feed sources, keeping cached list");
                return false;
            }
        };

        let total = records.len();
        let sources: Vec<FeedSource> = records
            .iter()
            .filter_map(|record| match FeedSource::from_record(record) {
                Ok(source) => Some(source),
                Err(e) => {
                    debug!(source_id = record.id, url = %record.url, error = %e, "Skipping unconfigured source");
                    None
                }
            })
            .collect();

        if sources.is_empty() {
            debug!(total, "No usable sources returned, keeping cached list");
            return false;
        }

        info!(
            active = sources.len(),
            skipped = total - sources.len(),
            "Refreshed feed sources"
        );

        let snapshot: Arc<[FeedSource]> = Arc::from(sources);
        match self.cache.write() {
            Ok(mut cache) => *cache = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
        true
    }

    /// Current snapshot of the cache.
    pub fn current(&self) -> Arc<[FeedSource]> {
        match self.cache.read() {
            Ok(cache) => Arc::clone(&cache),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}
