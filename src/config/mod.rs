//! Configuration module for Quote-Relay
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, with a small set of environment overrides layered on top.
//!
//! # Example
//!
//! ```no_run
//! use quote_relay::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("quote-relay.toml")).unwrap();
//! println!("Proxying to {} in {} mode", config.backend.base_url, config.mode);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BackendConfig, Config, RunMode, ServerConfig, SimulationMode};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash,
    load_default_config, parse_config, ENV_API_BASE_URL, ENV_MODE, ENV_WS_URL,
};
pub use validation::validate;
