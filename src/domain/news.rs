use serde_json::{Map, Value};

/// Projected fields of one feed item, keyed by output field name.
pub type Payload = Map<String, Value>;

/// Summary row returned when listing stored news.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub id: i64,
    pub title: String,
    /// URL of the source the item came from.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDetail {
    pub title: String,
    pub payload_json: String,
    pub source: String,
}

impl NewsDetail {
    pub fn payload(&self) -> serde_json::Result<Payload> {
        serde_json::from_str(&self.payload_json)
    }
}
