//! Client-facing proxy routes
//!
//! # Endpoints
//!
//! - `POST /api/scrape/start` - Start a backend scraping job
//! - `GET /api/scrape/status` - Current backend job status
//! - `POST /api/scrape/stop` - Stop the backend job
//! - `GET /api/quotes` - Quotes stored by the backend
//! - `GET /health` - Liveness probe
//!
//! Each route forwards once to the backend. On failure the development
//! mode answers with a canned payload; production answers HTTP 500.

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::backend::{BackendClient, QuotesQuery};
use crate::config::RunMode;
use crate::proxy::{fallback, ApiEnvelope, StartRequest};

/// Shared state for the proxy routes
#[derive(Debug)]
pub struct ProxyState {
    backend: BackendClient,
    mode: RunMode,
}

impl ProxyState {
    #[must_use]
    pub fn new(backend: BackendClient, mode: RunMode) -> Self {
        Self { backend, mode }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn backend_url(&self) -> &str {
        self.backend.base_url()
    }

    /// Applies the failure policy for a route
    ///
    /// Covers both backend failures and unreadable request bodies.
    fn recover(
        &self,
        error: impl fmt::Display,
        failure_message: &'static str,
        fallback: fn() -> ApiEnvelope,
    ) -> Result<Json<ApiEnvelope>, ApiError> {
        tracing::error!(error = %error, "{}", failure_message);

        if self.mode.is_development() {
            tracing::warn!("Backend unavailable, answering with development fallback");
            Ok(Json(fallback()))
        } else {
            Err(ApiError::internal(failure_message))
        }
    }
}

/// Create the Axum router with all proxy endpoints.
#[must_use]
pub fn create_router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/scrape/start", post(start_scrape))
        .route("/api/scrape/status", get(scrape_status))
        .route("/api/scrape/stop", post(stop_scrape))
        .route("/api/quotes", get(list_quotes))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn start_scrape(
    State(state): State<Arc<ProxyState>>,
    body: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<ApiEnvelope>, ApiError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return state.recover(
                rejection.body_text(),
                "Failed to start scraping",
                fallback::start,
            );
        }
    };

    tracing::info!(
        topic = %req.topic,
        max_quotes = ?req.max_quotes.resolve(),
        "Start scraping requested"
    );

    match state.backend.start_scrape(&req.to_backend()).await {
        Ok(data) => Ok(Json(
            ApiEnvelope::success(data)
                .with_message(format!("Scraping started for \"{}\"", req.topic)),
        )),
        Err(e) => state.recover(e, "Failed to start scraping", fallback::start),
    }
}

async fn scrape_status(
    State(state): State<Arc<ProxyState>>,
) -> Result<Json<ApiEnvelope>, ApiError> {
    match state.backend.scrape_status().await {
        Ok(data) => Ok(Json(ApiEnvelope::success(data))),
        Err(e) => state.recover(e, "Failed to fetch scraping status", fallback::status),
    }
}

async fn stop_scrape(State(state): State<Arc<ProxyState>>) -> Result<Json<ApiEnvelope>, ApiError> {
    tracing::info!("Stop scraping requested");

    match state.backend.stop_scrape().await {
        Ok(data) => Ok(Json(ApiEnvelope::success(data).with_message("Scraping stopped"))),
        Err(e) => state.recover(e, "Failed to stop scraping", fallback::stop),
    }
}

async fn list_quotes(
    State(state): State<Arc<ProxyState>>,
    Query(query): Query<QuotesQuery>,
) -> Result<Json<ApiEnvelope>, ApiError> {
    match state.backend.list_quotes(&query).await {
        Ok(data) => Ok(Json(ApiEnvelope::success(data))),
        Err(e) => state.recover(e, "Failed to fetch quotes", fallback::quotes),
    }
}

/// API error response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(ApiEnvelope::failure(self.message))).into_response()
    }
}
