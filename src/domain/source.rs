use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::domain::Rule;

/// A source row as storage holds it, with the rule still in string form.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub id: i64,
    pub url: String,
    pub rule: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SourceRecord {
    pub fn new(id: i64, url: impl Into<String>, rule: Option<String>) -> Self {
        Self {
            id,
            url: url.into(),
            rule,
            created_at: Utc::now(),
        }
    }
}

/// A source that is ready to be polled: its rule has been compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub id: i64,
    pub url: String,
    pub rule: Rule,
}

impl FeedSource {
    /// Compile a stored record. Fails with `EmptyRule` for unconfigured sources.
    pub fn from_record(record: &SourceRecord) -> Result<Self> {
        let rule = Rule::compile(record.rule.as_deref().unwrap_or_default())?;
        Ok(Self {
            id: record.id,
            url: record.url.clone(),
            rule,
        })
    }
}
