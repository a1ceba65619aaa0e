// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local use.

use std::env;
use std::time::Duration;

/// Default Endomondo mobile API host.
pub const DEFAULT_BASE_URL: &str = "https://api.mobile.endomondo.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endomondo API base URL (overridable for tests)
    pub base_url: String,
    /// Previously issued auth token, reused instead of logging in
    pub auth_token: Option<String>,
    /// Login email for single-account commands
    pub email: Option<String>,
    /// Login password for single-account commands
    pub password: Option<String>,
    /// GCP project ID
    pub gcp_project_id: String,
    /// SQLite URL for the optional workout summary table
    pub summary_database_url: Option<String>,
    /// Transport timeout for API calls; `None` keeps the client default
    pub http_timeout: Option<Duration>,
    /// Host name the device id is derived from
    pub device_hostname: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            email: None,
            password: None,
            gcp_project_id: "test-project".to_string(),
            summary_database_url: None,
            http_timeout: None,
            device_hostname: "localhost".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let http_timeout = match non_empty_var("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECS", raw.clone()))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url: non_empty_var("ENDOMONDO_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            auth_token: non_empty_var("ENDOMONDO_AUTH_TOKEN").map(|v| v.trim().to_string()),
            email: non_empty_var("ENDOMONDO_EMAIL"),
            password: non_empty_var("ENDOMONDO_PASSWORD"),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            summary_database_url: non_empty_var("SUMMARY_DATABASE_URL"),
            http_timeout,
            device_hostname: resolve_hostname(),
        })
    }

    /// Credentials for single-account commands, when both halves are set.
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some((email.clone(), password.clone())),
            _ => None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Host name used for the device id: `DEVICE_HOSTNAME` if set, otherwise the
/// OS host name.
fn resolve_hostname() -> String {
    let system = gethostname::gethostname().to_string_lossy().into_owned();
    pick_hostname(non_empty_var("DEVICE_HOSTNAME"), Some(system))
}

fn pick_hostname(configured: Option<String>, system: Option<String>) -> String {
    configured
        .or_else(|| {
            system
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| "localhost".to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("ENDOMONDO_BASE_URL", "http://127.0.0.1:9999/");
        env::set_var("ENDOMONDO_AUTH_TOKEN", " stored-token ");
        env::set_var("DEVICE_HOSTNAME", "archive-box");
        env::set_var("HTTP_TIMEOUT_SECS", "30");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.auth_token.as_deref(), Some("stored-token"));
        assert_eq!(config.device_hostname, "archive-box");
        assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));

        env::set_var("HTTP_TIMEOUT_SECS", "soon");
        let err = Config::from_env().expect_err("non-numeric timeout must fail");
        assert!(matches!(err, ConfigError::Invalid("HTTP_TIMEOUT_SECS", _)));

        env::remove_var("HTTP_TIMEOUT_SECS");
        env::remove_var("ENDOMONDO_BASE_URL");
        env::remove_var("ENDOMONDO_AUTH_TOKEN");
        env::remove_var("DEVICE_HOSTNAME");
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let mut config = Config {
            email: Some("runner@example.com".to_string()),
            ..Config::default()
        };
        assert!(config.credentials().is_none());

        config.password = Some("secret".to_string());
        assert_eq!(
            config.credentials(),
            Some(("runner@example.com".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_hostname_override_wins_over_os_name() {
        assert_eq!(
            pick_hostname(Some("archive-box".to_string()), Some("laptop".to_string())),
            "archive-box"
        );
        assert_eq!(pick_hostname(None, Some("laptop\n".to_string())), "laptop");
    }

    #[test]
    fn test_hostname_falls_back_to_localhost() {
        assert_eq!(pick_hostname(None, Some("  ".to_string())), "localhost");
        assert_eq!(pick_hostname(None, None), "localhost");
    }

    #[test]
    fn test_resolved_hostname_is_never_empty() {
        assert!(!resolve_hostname().is_empty());
    }
}
