//! The feed synchronization engine.
//!
//! ```text
//! SourceRegistry → Fetcher → project → Persister → Store
//! ```
//!
//! [`SyncScheduler`] walks the registry's cached sources one at a time, fetches
//! each feed, projects every item through the source's [`Rule`](crate::domain::Rule)
//! and stores the result. After a pass it refreshes the registry and sleeps.

mod persister;
mod projector;
mod registry;
mod scheduler;
mod shutdown;

pub use persister::{PersistOutcome, Persister};
pub use projector::project;
pub use registry::SourceRegistry;
pub use scheduler::{PassReport, SyncScheduler};
pub use shutdown::Shutdown;
