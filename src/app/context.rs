use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{FeedsyncError, Result};
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::store::SqliteStore;
use crate::sync::SyncScheduler;

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match &config.database.path {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(store, config)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_store(store, config)
    }

    fn with_store(store: Arc<SqliteStore>, config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetcher)?);

        Ok(Self {
            store,
            fetcher,
            config,
        })
    }

    /// Build a scheduler over this context's store and fetcher.
    pub fn scheduler(&self) -> SyncScheduler {
        SyncScheduler::new(
            self.store.clone(),
            self.fetcher.clone(),
            self.config.sync.fetch_timeout(),
        )
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| FeedsyncError::Config("Could not find data directory".into()))?;
        let feedsync_dir = data_dir.join("feedsync");
        std::fs::create_dir_all(&feedsync_dir)?;
        Ok(feedsync_dir.join("feedsync.db"))
    }
}
