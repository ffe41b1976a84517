//! Session module for tracking a scraping job from the client side
//!
//! # Components
//!
//! - `SessionStatus`: lifecycle of the job as the client sees it
//! - `SessionStore`: the per-client store with `start`/`stop`/`reset`
//! - `ApiClient`: HTTP client for the proxy routes the store calls

mod client;
mod status;
mod store;

pub use client::{ApiClient, ApiClientError};
pub use status::SessionStatus;
pub use store::{ScrapingSession, SessionStore, StartParams};

// Wire type shared with the proxy routes
pub use crate::proxy::MaxQuotes;
