//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CUSTDESK_API_URL` - Base URL of the customer REST API (default: `http://localhost:5000`)
//! - `CUSTDESK_LOG_JSON` - Emit JSON log lines when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., "development")

use thiserror::Error;
use url::Url;

/// Default base URL of the customer API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API; `/api/customers` is resolved against it
    pub api_url: Url,
    /// Emit JSON logs instead of human-readable text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("CUSTDESK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CUSTDESK_API_URL".to_string(), e))?;

        let log_json = match lookup("CUSTDESK_LOG_JSON").as_deref() {
            None | Some("" | "0" | "false") => false,
            Some("1" | "true") => true,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "CUSTDESK_LOG_JSON".to_string(),
                    format!("expected true/false, got '{other}'"),
                ));
            }
        };

        Ok(Self {
            api_url,
            log_json,
            sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|s| !s.is_empty()),
        })
    }

    /// Replace the API base URL (e.g., from a command-line flag).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL cannot be parsed.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(raw)
            .map_err(|e| ConfigError::InvalidEnvVar("--api-url".to_string(), e))?;
        Ok(self)
    }
}

/// Parse a base URL, requiring an http(s) scheme.
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:5000/");
        assert!(!config.log_json);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_reads_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("CUSTDESK_API_URL", "https://crm.example.com/base/"),
            ("CUSTDESK_LOG_JSON", "true"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ]))
        .unwrap();

        assert_eq!(config.api_url.as_str(), "https://crm.example.com/base/");
        assert!(config.log_json);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_invalid_api_url() {
        let err = ClientConfig::from_lookup(lookup_from(&[("CUSTDESK_API_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CUSTDESK_API_URL"));

        let err = ClientConfig::from_lookup(lookup_from(&[("CUSTDESK_API_URL", "ftp://host")]))
            .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_invalid_log_flag() {
        let result = ClientConfig::from_lookup(lookup_from(&[("CUSTDESK_LOG_JSON", "yes")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_with_api_url_override() {
        let base = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        let config = base.clone().with_api_url("http://127.0.0.1:9000").unwrap();
        assert_eq!(config.api_url.port(), Some(9000));
        assert!(base.with_api_url("::").is_err());
    }
}
