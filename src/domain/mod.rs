pub mod item;
pub mod news;
pub mod rule;
pub mod source;

pub use item::FeedItem;
pub use news::{News, NewsDetail, Payload};
pub use rule::{FieldPair, Rule};
pub use source::{FeedSource, SourceRecord};
