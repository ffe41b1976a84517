//! Canned responses for development mode
//!
//! When the backend cannot be reached and the proxy runs in development
//! mode, these payloads are returned instead of an error so the client can
//! still be exercised locally.

use crate::backend::ScrapeStatusReport;
use crate::proxy::ApiEnvelope;
use serde_json::json;

/// Stand-in for a successful `POST /api/scrape/start`
pub fn start() -> ApiEnvelope {
    ApiEnvelope::success(json!({ "status": "started" }))
        .with_message("Development mode - simulated start")
}

/// Stand-in for `GET /api/scrape/status`: an idle backend
pub fn status() -> ApiEnvelope {
    let report = serde_json::to_value(ScrapeStatusReport::idle())
        .unwrap_or_else(|_| json!({ "status": "idle" }));
    ApiEnvelope::success(report)
}

/// Stand-in for a successful `POST /api/scrape/stop`
pub fn stop() -> ApiEnvelope {
    ApiEnvelope::success(json!({ "status": "stopped" }))
        .with_message("Development mode - simulated stop")
}

/// Stand-in for `GET /api/quotes`: nothing stored yet
pub fn quotes() -> ApiEnvelope {
    ApiEnvelope::success(json!({ "quotes": [], "total": 0 }))
}
