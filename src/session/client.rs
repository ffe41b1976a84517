//! HTTP client for the client-facing proxy surface
//!
//! The session store talks to the proxy routes, not to the backend: it
//! sends camelCase bodies and receives `ApiEnvelope` responses.

use crate::backend::{build_http_client, QuotesPage, QuotesQuery};
use crate::proxy::{ApiEnvelope, StartRequest};
use crate::quotes::Quote;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors raised by the proxy-surface client
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("API returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode API response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unexpected payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Client for `/api/scrape/*` on the proxy
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the proxy at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        let client = build_http_client(timeout).map_err(ApiClientError::Client)?;
        Self::with_client(client, base_url)
    }

    /// Wraps an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiClientError> {
        Url::parse(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `POST /api/scrape/start`; a `success: false` envelope is an error
    pub async fn start(&self, body: &StartRequest) -> Result<ApiEnvelope, ApiClientError> {
        let url = self.endpoint("/api/scrape/start");
        let envelope = self.send(self.client.post(&url).json(body), &url).await?;
        accept(envelope, "Failed to start scraping")
    }

    /// `POST /api/scrape/stop`
    pub async fn stop(&self) -> Result<ApiEnvelope, ApiClientError> {
        let url = self.endpoint("/api/scrape/stop");
        let envelope = self.send(self.client.post(&url), &url).await?;
        accept(envelope, "Failed to stop scraping")
    }

    /// `GET /api/scrape/status`
    pub async fn status(&self) -> Result<ApiEnvelope, ApiClientError> {
        let url = self.endpoint("/api/scrape/status");
        let envelope = self.send(self.client.get(&url), &url).await?;
        accept(envelope, "Failed to fetch scraping status")
    }

    /// `GET /api/quotes`, converted to store quotes tagged with the query topic
    pub async fn quotes(&self, query: &QuotesQuery) -> Result<Vec<Quote>, ApiClientError> {
        let url = self.endpoint("/api/quotes");
        let envelope = self.send(self.client.get(&url).query(query), &url).await?;
        let envelope = accept(envelope, "Failed to fetch quotes")?;

        let page: QuotesPage = match envelope.data {
            Some(data) => serde_json::from_value(data)?,
            None => QuotesPage::default(),
        };
        Ok(page.into_quotes(query.topic.as_deref()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<ApiEnvelope, ApiClientError> {
        let response = request.send().await.map_err(|source| ApiClientError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<ApiEnvelope>()
            .await
            .map_err(|source| ApiClientError::Decode {
                url: url.to_string(),
                source,
            })
    }
}

fn accept(envelope: ApiEnvelope, default_reason: &str) -> Result<ApiEnvelope, ApiClientError> {
    if envelope.success {
        Ok(envelope)
    } else {
        let reason = envelope.failure_reason().unwrap_or(default_reason);
        Err(ApiClientError::Rejected(reason.to_string()))
    }
}
