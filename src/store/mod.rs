pub mod sqlite;

use crate::app::Result;
use crate::domain::{News, NewsDetail, SourceRecord};

pub use sqlite::SqliteStore;

pub trait Store {
    // Source operations
    fn create_source(&self, url: &str, rule: &str) -> Result<i64>;
    fn list_sources(&self) -> Result<Vec<SourceRecord>>;

    // News operations
    /// Insert one news row. A title that is already stored yields `DuplicateNews`.
    fn create_news(&self, source_id: i64, title: &str, payload_json: &str) -> Result<()>;
    fn get_news(&self, offset: usize, count: usize) -> Result<Vec<News>>;
    fn get_news_with_title(&self, title: &str, offset: usize, count: usize) -> Result<Vec<News>>;
    fn get_news_detail(&self, id: i64) -> Result<NewsDetail>;
}
