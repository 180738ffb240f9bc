use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::Result;
use crate::config::FetcherConfig;
use crate::domain::FeedItem;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

pub struct HttpFetcher {
    client: Client,
    normalizer: Normalizer,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            normalizer: Normalizer::new(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        tracing::debug!(url, bytes = body.len(), "Fetched feed");

        self.normalizer.normalize(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FeedsyncError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item><title>Hello</title><guid>h-1</guid></item>
</channel></rss>"#;

    #[tokio::test]
    async fn test_fetch_parses_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
        let items = fetcher
            .fetch(&format!("{}/feed.xml", server.uri()))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Hello");
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
        let result = fetcher.fetch(&format!("{}/feed.xml", server.uri())).await;

        assert!(matches!(result, Err(FeedsyncError::Http(_))));
    }

    #[tokio::test]
    async fn test_fetch_unparseable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
        let result = fetcher.fetch(&server.uri()).await;

        assert!(matches!(result, Err(FeedsyncError::FeedParse(_))));
    }
}
