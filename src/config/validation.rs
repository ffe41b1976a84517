use crate::config::types::{BackendConfig, Config, ServerConfig};
use crate::ConfigError;
use std::net::IpAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_backend_config(&config.backend)?;
    validate_server_config(&config.server)?;

    if config.simulate && !config.mode.is_development() {
        return Err(ConfigError::Validation(format!(
            "simulate can only be enabled in development mode, got mode '{}'",
            config.mode
        )));
    }

    Ok(())
}

/// Validates backend URLs and timeouts
fn validate_backend_config(config: &BackendConfig) -> Result<(), ConfigError> {
    validate_url_scheme(&config.base_url, "base_url", &["http", "https"])?;
    validate_url_scheme(&config.ws_url, "ws_url", &["ws", "wss"])?;

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates listener configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.bind_address.parse::<IpAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "bind_address must be an IP address, got '{}'",
            config.bind_address
        )));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation("port cannot be 0".to_string()));
    }

    Ok(())
}

/// Parses a URL and checks it uses one of the allowed schemes
fn validate_url_scheme(raw: &str, field: &str, schemes: &[&str]) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if !schemes.contains(&url.scheme()) {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use one of: {}",
            field,
            raw,
            schemes.join(", ")
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!("{} '{}' has no host", field, raw)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RunMode;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_url_scheme() {
        let http = &["http", "https"];
        assert!(validate_url_scheme("http://localhost:8000", "base_url", http).is_ok());
        assert!(validate_url_scheme("https://api.example.com", "base_url", http).is_ok());
        assert!(validate_url_scheme("wss://api.example.com/ws", "ws_url", &["ws", "wss"]).is_ok());

        assert!(validate_url_scheme("", "base_url", &["http", "https"]).is_err());
        assert!(validate_url_scheme("ftp://example.com", "base_url", &["http", "https"]).is_err());
        assert!(validate_url_scheme("http://localhost:8000", "ws_url", &["ws", "wss"]).is_err());
    }

    #[test]
    fn test_simulate_requires_development() {
        let mut config = Config::default();
        config.simulate = true;
        assert!(validate(&config).is_ok());

        config.mode = RunMode::Production;
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_server_config() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.server.bind_address = "localhost".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.backend.request_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }
}
