pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::FeedItem;

pub use http_fetcher::HttpFetcher;

/// Fetches a feed and hands back its parsed items.
///
/// An `Ok` with an empty vector means the feed exists but has no entries;
/// any transport or parse failure is an `Err`.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>>;
}
