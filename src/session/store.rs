//! Scraping session store
//!
//! Tracks the client's view of one backend scraping job. Backend failures
//! never escape as `Err`: a failed start lands in `SessionStatus::Error`
//! with the reason kept in `last_error`, a failed stop still ends in
//! `Stopped`.

use crate::backend::ScrapeStatusReport;
use crate::config::SimulationMode;
use crate::proxy::{MaxQuotes, StartRequest};
use crate::session::{ApiClient, ApiClientError, SessionStatus};
use chrono::Utc;
use serde::Serialize;

/// Parameters accepted by `SessionStore::start`
#[derive(Debug, Clone, PartialEq)]
pub struct StartParams {
    pub topic: String,
    pub max_quotes: MaxQuotes,
    pub include_images: Option<bool>,
    pub store_in_database: Option<bool>,
}

impl StartParams {
    /// Parameters for `topic` with every option left to its default
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            max_quotes: MaxQuotes::Unset,
            include_images: None,
            store_in_database: None,
        }
    }

    pub fn max_quotes(mut self, max_quotes: MaxQuotes) -> Self {
        self.max_quotes = max_quotes;
        self
    }

    pub fn include_images(mut self, include: bool) -> Self {
        self.include_images = Some(include);
        self
    }

    pub fn store_in_database(mut self, store: bool) -> Self {
        self.store_in_database = Some(store);
        self
    }

    /// Body sent to the proxy, with defaults filled in
    ///
    /// `Unset` becomes the default limit; `Unlimited` is kept as `null`.
    fn to_request(&self) -> StartRequest {
        let max_quotes = match self.max_quotes {
            MaxQuotes::Unset => MaxQuotes::Limit(MaxQuotes::DEFAULT_LIMIT),
            other => other,
        };

        StartRequest {
            topic: self.topic.clone(),
            max_quotes,
            include_images: Some(self.include_images.unwrap_or(true)),
            store_in_database: Some(self.store_in_database.unwrap_or(true)),
        }
    }
}

/// Snapshot of the session fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapingSession {
    pub status: SessionStatus,
    pub current_topic: String,
    /// Epoch milliseconds; 0 when never started
    pub start_time: i64,
    /// Reason of the most recent failed backend call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Session store for one client
///
/// Constructed explicitly and owned by its caller; nothing is shared
/// between sessions.
#[derive(Debug)]
pub struct SessionStore {
    api: ApiClient,
    simulation: SimulationMode,
    session: ScrapingSession,
}

impl SessionStore {
    /// Creates an idle session store
    pub fn new(api: ApiClient, simulation: SimulationMode) -> Self {
        if simulation.is_enabled() {
            tracing::warn!("Session store running in simulation mode, backend calls are skipped");
        }

        Self {
            api,
            simulation,
            session: ScrapingSession::default(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status
    }

    pub fn current_topic(&self) -> &str {
        &self.session.current_topic
    }

    pub fn start_time(&self) -> i64 {
        self.session.start_time
    }

    /// Reason of the most recent failed backend call
    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error.as_deref()
    }

    pub fn snapshot(&self) -> ScrapingSession {
        self.session.clone()
    }

    /// Overrides the status directly
    ///
    /// Used for statuses observed from the backend. A change off the
    /// forward path is applied but logged.
    pub fn set_status(&mut self, status: SessionStatus) {
        let current = self.session.status;
        if !current.can_transition_to(status) {
            tracing::warn!(
                from = %current,
                to = %status,
                "Status override outside the forward path"
            );
        }
        self.session.status = status;
    }

    /// Starts a scraping job for `params.topic`
    ///
    /// # Returns
    ///
    /// The resulting status: `Running` when the proxy acknowledged the
    /// job (or simulation is on), `Error` otherwise.
    pub async fn start(&mut self, params: StartParams) -> SessionStatus {
        self.session.status = SessionStatus::Starting;
        self.session.current_topic = params.topic.clone();
        self.session.start_time = Utc::now().timestamp_millis();
        self.session.last_error = None;

        if self.simulation.is_enabled() {
            tracing::warn!(topic = %params.topic, "Simulated scraping start");
            self.session.status = SessionStatus::Running;
            return self.session.status;
        }

        match self.api.start(&params.to_request()).await {
            Ok(_) => {
                tracing::info!(topic = %params.topic, "Scraping started");
                self.session.status = SessionStatus::Running;
            }
            Err(e) => {
                tracing::error!(topic = %params.topic, error = %e, "Failed to start scraping");
                self.session.last_error = Some(failure_reason(e));
                self.session.status = SessionStatus::Error;
            }
        }

        self.session.status
    }

    /// Stops the current job; always ends in `Stopped`
    pub async fn stop(&mut self) -> SessionStatus {
        if self.simulation.is_enabled() {
            tracing::warn!("Simulated scraping stop");
        } else if let Err(e) = self.api.stop().await {
            tracing::error!(error = %e, "Failed to stop scraping");
            self.session.last_error = Some(failure_reason(e));
        } else {
            tracing::info!("Scraping stopped");
        }

        self.session.status = SessionStatus::Stopped;
        self.session.status
    }

    /// Returns to `Idle` and forgets topic, start time and last error
    pub fn reset(&mut self) {
        self.session = ScrapingSession::default();
    }

    /// Polls the proxy for the backend status and applies it
    ///
    /// Returns the applied status, or None when the poll failed or the
    /// backend reported something unrecognised. The current status is left
    /// alone in both cases.
    pub async fn sync_status(&mut self) -> Option<SessionStatus> {
        if self.simulation.is_enabled() {
            return None;
        }

        let envelope = match self.api.status().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to poll scraping status");
                return None;
            }
        };

        let report: ScrapeStatusReport = match envelope.data.map(serde_json::from_value) {
            Some(Ok(report)) => report,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Unreadable scraping status payload");
                return None;
            }
            None => {
                tracing::warn!("Scraping status response carried no data");
                return None;
            }
        };

        match SessionStatus::from_backend(&report.status) {
            Some(status) => {
                self.set_status(status);
                Some(status)
            }
            None => {
                tracing::warn!(status = %report.status, "Unknown backend status ignored");
                None
            }
        }
    }

    /// True while a job is starting or running
    pub fn is_active(&self) -> bool {
        self.session.status.is_active()
    }

    /// Milliseconds since the job was started, 0 if never started
    pub fn elapsed(&self) -> i64 {
        self.elapsed_at(Utc::now().timestamp_millis())
    }

    /// Same as `elapsed` against a caller-supplied clock
    pub fn elapsed_at(&self, now_ms: i64) -> i64 {
        if self.session.start_time == 0 {
            0
        } else {
            (now_ms - self.session.start_time).max(0)
        }
    }
}

/// Text kept in `last_error`: the proxy's own reason when it rejected the
/// request, the full error otherwise
fn failure_reason(error: ApiClientError) -> String {
    match error {
        ApiClientError::Rejected(reason) => reason,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    fn offline_store(simulation: SimulationMode) -> SessionStore {
        // port 9 (discard) is never served in test environments
        let api = ApiClient::with_client(Client::new(), "http://127.0.0.1:9").unwrap();
        SessionStore::new(api, simulation)
    }

    #[test]
    fn test_new_store_is_idle() {
        let store = offline_store(SimulationMode::Disabled);
        assert_eq!(store.status(), SessionStatus::Idle);
        assert_eq!(store.current_topic(), "");
        assert_eq!(store.start_time(), 0);
        assert_eq!(store.elapsed(), 0);
        assert!(!store.is_active());
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_start_params_defaults() {
        let request = StartParams::new("love").to_request();
        assert_eq!(request.max_quotes, MaxQuotes::Limit(10));
        assert_eq!(request.include_images, Some(true));
        assert_eq!(request.store_in_database, Some(true));

        let request = StartParams::new("love")
            .max_quotes(MaxQuotes::Unlimited)
            .include_images(false)
            .to_request();
        assert_eq!(request.max_quotes, MaxQuotes::Unlimited);
        assert_eq!(request.include_images, Some(false));
    }

    #[tokio::test]
    async fn test_simulated_start_and_stop() {
        let mut store = offline_store(SimulationMode::Enabled);

        let status = store.start(StartParams::new("love")).await;
        assert_eq!(status, SessionStatus::Running);
        assert_eq!(store.current_topic(), "love");
        assert!(store.start_time() > 0);
        assert!(store.is_active());

        assert_eq!(store.stop().await, SessionStatus::Stopped);
        assert!(store.last_error().is_none());
        assert_eq!(store.sync_status().await, None);
    }

    #[tokio::test]
    async fn test_unreachable_start_is_error() {
        let mut store = offline_store(SimulationMode::Disabled);

        let status = store.start(StartParams::new("love")).await;
        assert_eq!(status, SessionStatus::Error);
        assert!(store.last_error().is_some());
        assert!(!store.is_active());
    }

    #[tokio::test]
    async fn test_unreachable_stop_still_stops() {
        let mut store = offline_store(SimulationMode::Disabled);
        assert_eq!(store.stop().await, SessionStatus::Stopped);
        assert!(store.last_error().is_some());
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut store = offline_store(SimulationMode::Enabled);
        store.start(StartParams::new("life")).await;
        store.reset();

        assert_eq!(store.status(), SessionStatus::Idle);
        assert_eq!(store.current_topic(), "");
        assert_eq!(store.start_time(), 0);
        assert_eq!(store.elapsed(), 0);
    }

    #[test]
    fn test_set_status_overrides() {
        let mut store = offline_store(SimulationMode::Disabled);
        store.set_status(SessionStatus::Done);
        assert_eq!(store.status(), SessionStatus::Done);
        assert!(!store.is_active());
    }

    #[test]
    fn test_elapsed_at() {
        let mut store = offline_store(SimulationMode::Disabled);
        assert_eq!(store.elapsed_at(5_000), 0);

        store.session.start_time = 1_000;
        assert_eq!(store.elapsed_at(4_500), 3_500);
        // clock skew never yields a negative duration
        assert_eq!(store.elapsed_at(500), 0);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let store = offline_store(SimulationMode::Disabled);
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["status"], "idle");
        assert_eq!(json["currentTopic"], "");
        assert_eq!(json["startTime"], 0);
        assert!(json.get("lastError").is_none());
    }

    #[tokio::test]
    async fn test_snapshot_carries_last_error() {
        let mut store = offline_store(SimulationMode::Disabled);
        store.start(StartParams::new("love")).await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Error);
        assert_eq!(snapshot.last_error.as_deref(), store.last_error());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["lastError"].is_string());

        store.reset();
        assert!(store.snapshot().last_error.is_none());
    }

    #[test]
    fn test_failure_reason_unwraps_rejection() {
        assert_eq!(failure_reason(ApiClientError::Rejected("x".to_string())), "x");

        let status = ApiClientError::Status {
            url: "http://proxy/api/scrape/start".to_string(),
            status: 500,
        };
        assert_eq!(
            failure_reason(status),
            "API returned 500 for http://proxy/api/scrape/start"
        );
    }
}
