//! # feedsync
//!
//! Periodically pulls RSS/Atom feeds, keeps a configurable subset of each
//! item's fields and stores one deduplicated record per item title.
//!
//! ## Architecture
//!
//! ```text
//! Store ─▶ SourceRegistry ─▶ Fetcher ─▶ project ─▶ Persister ─▶ Store
//! ```
//!
//! Every source carries a rule such as `"Title=t,GUID=id,Link"`: each item
//! field named on the left (matched case-insensitively) is copied into the
//! stored payload under the name on the right.
//!
//! ## Quick Start
//!
//! ```bash
//! # Register a feed
//! feedsync add https://blog.rust-lang.org/feed.xml "Title=t,GUID=id,Link"
//!
//! # Poll every 5 seconds until Ctrl+C
//! feedsync run --interval 5s
//!
//! # Read what was stored
//! feedsync news --title Rust
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// fetcher and configuration.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/feedsync/config.toml`.
pub mod config;

/// Foreground runner that ties OS signals to the sync loop.
pub mod daemon;

/// Core domain models.
///
/// - [`Rule`](domain::Rule): compiled field-projection rule
/// - [`FeedSource`](domain::FeedSource): a pollable source
/// - [`FeedItem`](domain::FeedItem): a parsed entry with named fields
pub mod domain;

/// Feed fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait the scheduler depends on
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Converts RSS 0.9x/1.0/2.0, Atom and JSON Feed into [`FeedItem`](domain::FeedItem)s.
pub mod normalizer;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// The polling engine: registry, projection, persistence and scheduling.
pub mod sync;
