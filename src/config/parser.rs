use crate::config::types::{Config, RunMode};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable overriding `backend.base-url`
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";

/// Environment variable overriding `backend.ws-url`
pub const ENV_WS_URL: &str = "WS_URL";

/// Environment variable overriding `mode`
pub const ENV_MODE: &str = "QUOTE_RELAY_MODE";

/// Loads and parses a configuration file from the given path
///
/// Environment overrides are applied after parsing and before validation.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use quote_relay::config::load_config;
///
/// let config = load_config(Path::new("quote-relay.toml")).unwrap();
/// println!("Backend: {}", config.backend.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    let config = apply_env_overrides(config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Builds a configuration from defaults and the environment alone
pub fn load_default_config() -> Result<Config, ConfigError> {
    let config = apply_env_overrides(Config::default(), |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Parses TOML content into a configuration without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Applies environment overrides using the given lookup
///
/// Empty values are ignored so an exported-but-blank variable does not
/// wipe the file setting.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(base_url) = present(ENV_API_BASE_URL) {
        tracing::debug!(base_url = %base_url, "Backend URL overridden from environment");
        config.backend.base_url = base_url;
    }

    if let Some(ws_url) = present(ENV_WS_URL) {
        config.backend.ws_url = ws_url;
    }

    if let Some(raw) = present(ENV_MODE) {
        config.mode = RunMode::parse(&raw).ok_or_else(|| {
            ConfigError::Validation(format!(
                "{} must be 'development' or 'production', got '{}'",
                ENV_MODE, raw
            ))
        })?;
    }

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so deployments can tell which file a process runs with.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
mode = "production"

[backend]
base-url = "https://scraper.example.com"
ws-url = "wss://scraper.example.com/ws"
request-timeout-secs = 5

[server]
bind-address = "0.0.0.0"
port = 8080
"#,
        )
        .unwrap();

        assert_eq!(config.mode, RunMode::Production);
        assert!(!config.simulate);
        assert_eq!(config.backend.base_url, "https://scraper.example.com");
        assert_eq!(config.backend.ws_url, "wss://scraper.example.com/ws");
        assert_eq!(config.backend.request_timeout_secs, 5);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = parse_config(include_str!("../../quote-relay.example.toml")).unwrap();
        assert!(validate(&config).is_ok());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.mode, RunMode::Development);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.ws_url, "ws://localhost:8000");
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_BASE_URL, "http://backend:9000"),
            (ENV_WS_URL, ""),
            (ENV_MODE, "prod"),
        ]
        .into_iter()
        .collect();

        let config = apply_env_overrides(Config::default(), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.backend.base_url, "http://backend:9000");
        // blank value leaves the default alone
        assert_eq!(config.backend.ws_url, "ws://localhost:8000");
        assert_eq!(config.mode, RunMode::Production);
    }

    #[test]
    fn test_env_override_rejects_unknown_mode() {
        let result = apply_env_overrides(Config::default(), |key| {
            (key == ENV_MODE).then(|| "staging".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_no_env_keeps_file_values() {
        let config = parse_config("[backend]\nbase-url = \"http://10.0.0.2:8000\"\n").unwrap();
        let config = apply_env_overrides(config, no_env).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.2:8000");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/quote-relay.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_simulate_in_production_fails_validation() {
        let config = parse_config("mode = \"production\"\nsimulate = true\n").unwrap();
        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("mode = \"development\"");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
