//! Search API access.
//!
//! `GifSource` is the seam between the fetch worker and the network so the worker can be driven
//! by in-memory sources in tests.

use crate::config::Config;
use crate::error::{GiflensError, Result};
use crate::search::controller::{SearchQuery, PAGE_SIZE};
use crate::search::payload::SearchPayload;
use async_trait::async_trait;

/// Giphy's gif search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.giphy.com/v1/gifs/search";

/// Anything that can answer a paged search query.
#[async_trait]
pub trait GifSource: Send + Sync {
    /// Issue exactly one request for `query` and decode the response.
    async fn search(&self, query: &SearchQuery) -> Result<SearchPayload>;
}

/// HTTP client for the Giphy search API.
#[derive(Debug, Clone)]
pub struct GiphyClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GiphyClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("giflens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| GiflensError::network("failed to build HTTP client", err))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GifSource for GiphyClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPayload> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query.term.as_str()), ("api_key", self.api_key.as_str())])
            .query(&[("limit", PAGE_SIZE), ("offset", query.offset)])
            .send()
            .await
            .map_err(|err| GiflensError::network("request could not be sent", err))?
            .error_for_status()
            .map_err(|err| GiflensError::network("search endpoint returned an error", err))?;

        let body = response
            .text()
            .await
            .map_err(|err| GiflensError::network("response body could not be read", err))?;

        SearchPayload::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_endpoint() {
        let config = Config {
            endpoint: "http://127.0.0.1:9/v1/gifs/search".to_string(),
            ..Config::with_api_key("test-key")
        };
        let client = GiphyClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1/gifs/search");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_network_failure() {
        // Port 9 (discard) is closed on loopback in practice; the request fails fast.
        let config = Config {
            endpoint: "http://127.0.0.1:9/v1/gifs/search".to_string(),
            ..Config::with_api_key("test-key")
        };
        let client = GiphyClient::new(&config).unwrap();
        let err = client
            .search(&SearchQuery::new("cat", 0))
            .await
            .unwrap_err();

        assert!(err.is_fetch_failure());
    }
}
