//! Quote-Relay: a thin client and proxy for a quote-scraping backend
//!
//! This crate mirrors the state of an external scraping service into
//! client-side stores and relays scrape-control requests to it. The actual
//! scraping, job lifecycle and persistence live in the backend.

pub mod backend;
pub mod config;
pub mod proxy;
pub mod quotes;
pub mod session;

use thiserror::Error;

/// Main error type for Quote-Relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("API client error: {0}")]
    ApiClient(#[from] session::ApiClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while talking to the scraping backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Backend returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode backend response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),
}

/// Result type alias for Quote-Relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

// Re-export commonly used types
pub use config::{Config, RunMode, SimulationMode};
pub use quotes::{Quote, QuoteStore, QuoteUpdate};
pub use session::{MaxQuotes, SessionStatus, SessionStore, StartParams};
