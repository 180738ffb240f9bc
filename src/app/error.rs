use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedsyncError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Fetch timed out after {0:?}")]
    FetchTimeout(Duration),

    #[error("Payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing rule is empty")]
    EmptyRule,

    #[error("News already exists: {0}")]
    DuplicateNews(String),

    #[error("Source already exists: {0}")]
    DuplicateSource(String),

    #[error("News not found: {0}")]
    NewsNotFound(i64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FeedsyncError>;
