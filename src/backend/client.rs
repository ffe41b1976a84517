//! HTTP client for the scraping backend
//!
//! Every call is a single request: no retries, no backoff. Transport
//! failures, non-2xx statuses and undecodable bodies are all reported as
//! `BackendError` so callers can decide whether to mask them.

use crate::backend::types::{QuotesQuery, StartScrapeRequest};
use crate::config::BackendConfig;
use crate::{BackendError, BackendResult};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Client for the backend's scrape-control endpoints
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Builds a client from the backend configuration
    ///
    /// # Returns
    ///
    /// * `Ok(BackendClient)` - Client ready to use
    /// * `Err(BackendError)` - The base URL is malformed or the HTTP client failed to build
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let client = build_http_client(Duration::from_secs(config.request_timeout_secs))
            .map_err(BackendError::Client)?;
        Self::with_client(client, &config.base_url)
    }

    /// Wraps an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> BackendResult<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/scrape/start`
    pub async fn start_scrape(&self, request: &StartScrapeRequest) -> BackendResult<Value> {
        let url = self.endpoint("/api/scrape/start");
        tracing::debug!(url = %url, topic = %request.topic, "Forwarding start request");
        self.send_json(self.client.post(&url).json(request), &url).await
    }

    /// `GET /api/scrape/status`
    pub async fn scrape_status(&self) -> BackendResult<Value> {
        let url = self.endpoint("/api/scrape/status");
        self.send_json(self.client.get(&url), &url).await
    }

    /// `POST /api/scrape/stop`
    pub async fn stop_scrape(&self) -> BackendResult<Value> {
        let url = self.endpoint("/api/scrape/stop");
        tracing::debug!(url = %url, "Forwarding stop request");
        self.send_json(self.client.post(&url), &url).await
    }

    /// `GET /api/quotes`
    pub async fn list_quotes(&self, query: &QuotesQuery) -> BackendResult<Value> {
        let url = self.endpoint("/api/quotes");
        self.send_json(self.client.get(&url).query(query), &url).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json(&self, request: RequestBuilder, url: &str) -> BackendResult<Value> {
        let response = request
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|source| BackendError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|source| BackendError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Builds the HTTP client shared by all backend calls
///
/// Format of the user agent: `quote-relay/<version>`
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format!("quote-relay/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BackendClient::with_client(Client::new(), "http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.endpoint("/api/scrape/status"),
            "http://localhost:8000/api/scrape/status"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = BackendClient::with_client(Client::new(), "not a url");
        assert!(matches!(result, Err(BackendError::InvalidUrl(_))));
    }

    #[test]
    fn test_new_from_default_config() {
        let client = BackendClient::new(&BackendConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
