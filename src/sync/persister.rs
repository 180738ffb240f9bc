use std::sync::Arc;

use tracing::trace;

use crate::app::{FeedsyncError, Result};
use crate::domain::Payload;
use crate::store::Store;

/// What happened to an item handed to [`Persister::persist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Created,
    /// A news row with the same title was stored by an earlier pass.
    AlreadyIngested,
}

pub struct Persister {
    store: Arc<dyn Store + Send + Sync>,
}

impl Persister {
    pub fn new(store: Arc<dyn Store + Send + Sync>) -> Self {
        Self { store }
    }

    pub fn persist(&self, source_id: i64, title: &str, payload: &Payload) -> Result<PersistOutcome> {
        let payload_json = serde_json::to_string(payload)?;

        match self.store.create_news(source_id, title, &payload_json) {
            Ok(()) => Ok(PersistOutcome::Created),
            Err(FeedsyncError::DuplicateNews(_)) => {
                trace!(source_id, title, "News already ingested");
                Ok(PersistOutcome::AlreadyIngested)
            }
            Err(e) => Err(e),
        }
    }
}
