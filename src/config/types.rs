use serde::Deserialize;
use std::fmt;

/// Main configuration structure for Quote-Relay
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Development or production behavior for the proxy routes
    #[serde(default)]
    pub mode: RunMode,

    /// Whether the session store skips backend calls entirely
    #[serde(default)]
    pub simulate: bool,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Resolves the session store's simulation toggle
    ///
    /// Only honoured in development mode; validation rejects the other case.
    pub fn simulation_mode(&self) -> SimulationMode {
        if self.simulate && self.mode.is_development() {
            SimulationMode::Enabled
        } else {
            SimulationMode::Disabled
        }
    }
}

/// Backend service location
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the scraping backend
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Websocket URL of the backend (carried for clients, not used here)
    #[serde(rename = "ws-url", default = "default_ws_url")]
    pub ws_url: String,

    /// Timeout applied to each outbound request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ws_url: default_ws_url(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Listener configuration for the proxy server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// Deployment mode, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Proxy routes answer with canned payloads when the backend fails
    #[default]
    Development,
    /// Backend failures surface as HTTP 500
    Production,
}

impl RunMode {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the session store talks to the backend or pretends to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationMode {
    #[default]
    Disabled,
    Enabled,
}

impl SimulationMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_ws_url() -> String {
    "ws://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}
