// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Endomondo mobile API client.
//!
//! Handles:
//! - Token acquisition through the app pairing endpoint
//! - Workout listing with the `before` cursor
//! - Status checks on authenticated requests
//!
//! The client owns its token. Build one client per account and drive it from
//! a single task; nothing here is shared between instances.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{WorkoutListResponse, WorkoutRecord};
use crate::time_utils::{format_endomondo_utc, ENDOMONDO_TIME_FORMAT};

/// Token pairing endpoint.
pub const AUTH_PATH: &str = "/mobile/auth";
/// Workout listing ("history") endpoint.
pub const WORKOUTS_PATH: &str = "/mobile/api/workout/list";
/// Page size the mobile app asks for.
pub const DEFAULT_MAX_RESULTS: u32 = 40;

/// Device and app descriptors the mobile app sends when pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub country: String,
    pub device_id: String,
    pub os: String,
    pub os_version: String,
    pub app_version: String,
    pub app_variant: String,
    pub model: String,
}

impl Identity {
    /// Identity of an Android 7.1 app; the device id is a UUIDv5 of the host
    /// name so it stays stable across runs on the same machine.
    pub fn for_host(hostname: &str) -> Self {
        Self {
            country: "GB".to_string(),
            device_id: Uuid::new_v5(&Uuid::NAMESPACE_DNS, hostname.as_bytes()).to_string(),
            os: "Android".to_string(),
            os_version: "2.3.7".to_string(),
            app_version: "7.1".to_string(),
            app_variant: "M-Pro".to_string(),
            model: "HTC Vision".to_string(),
        }
    }

    pub fn user_agent(&self) -> String {
        format!(
            "Dalvik/1.4.0 (Linux; U; {} {}; {} Build/GRI40)",
            self.os, self.os_version, self.model
        )
    }

    fn query_params(&self) -> [(&'static str, &str); 7] {
        [
            ("country", self.country.as_str()),
            ("deviceId", self.device_id.as_str()),
            ("os", self.os.as_str()),
            ("appVersion", self.app_version.as_str()),
            ("appVariant", self.app_variant.as_str()),
            ("osVersion", self.os_version.as_str()),
            ("model", self.model.as_str()),
        ]
    }
}

/// Upper bound for a workout listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Before {
    /// Instant, already normalized to UTC.
    Timestamp(DateTime<Utc>),
    /// Pre-formatted cursor, sent unchanged.
    Formatted(String),
}

impl Before {
    /// Value for the `before` query parameter.
    pub fn to_param(&self) -> String {
        match self {
            Before::Timestamp(at) => format_endomondo_utc(at),
            Before::Formatted(raw) => raw.clone(),
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Before {
    fn from(at: DateTime<Tz>) -> Self {
        Before::Timestamp(at.with_timezone(&Utc))
    }
}

impl From<String> for Before {
    fn from(raw: String) -> Self {
        Before::Formatted(raw)
    }
}

impl From<&str> for Before {
    fn from(raw: &str) -> Self {
        Before::Formatted(raw.to_string())
    }
}

impl FromStr for Before {
    type Err = AppError;

    /// Accepts an RFC3339 timestamp or a `YYYY-MM-DD HH:MM:SS UTC` string.
    /// Bare integers are rejected rather than guessed as epoch seconds.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('-').unwrap_or(s);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::InvalidInput(format!(
                "`before` needs to be a timestamp or a formatted date string, got integer {}",
                s
            )));
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(s) {
            return Ok(at.into());
        }

        if NaiveDateTime::parse_from_str(s, ENDOMONDO_TIME_FORMAT).is_ok() {
            return Ok(Before::Formatted(s.to_string()));
        }

        Err(AppError::InvalidInput(format!(
            "`before` needs to be RFC3339 or `YYYY-MM-DD HH:MM:SS UTC`, got '{}'",
            s
        )))
    }
}

#[derive(Clone)]
struct Credentials {
    email: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Endomondo API client.
#[derive(Debug)]
pub struct EndomondoClient {
    http: reqwest::Client,
    base_url: String,
    identity: Identity,
    auth_token: Option<String>,
    credentials: Option<Credentials>,
}

impl EndomondoClient {
    /// Create an unauthenticated client for the given API host.
    pub fn new(base_url: impl Into<String>, identity: Identity) -> Result<Self> {
        let http = build_http_client(&identity, None)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            identity,
            auth_token: None,
            credentials: None,
        })
    }

    /// Create a client from configuration: host, timeout, device identity, and
    /// any stored token or credentials.
    pub fn from_config(config: &Config) -> Result<Self> {
        let identity = Identity::for_host(&config.device_hostname);
        let http = build_http_client(&identity, config.http_timeout)?;

        let mut client = Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            identity,
            auth_token: None,
            credentials: None,
        };

        if let Some(token) = &config.auth_token {
            client = client.with_auth_token(token.clone());
        }
        if let Some((email, password)) = config.credentials() {
            client = client.with_credentials(email, password);
        }
        Ok(client)
    }

    /// Replace the HTTP transport (e.g. to set a custom timeout or proxy).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Start from a previously issued token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Remember credentials so the first request can log in lazily.
    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            email: email.into(),
            password: password.into(),
        });
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Cached token, if one has been issued or injected.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    // ─── Authentication ──────────────────────────────────────────

    /// Request a new token from the pairing endpoint and cache it.
    pub async fn authenticate(&mut self, email: &str, password: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, AUTH_PATH);

        let mut params: Vec<(&str, &str)> = vec![
            ("v", "2.4"),
            ("action", "PAIR"),
            ("email", email),
            ("password", password),
        ];
        params.extend(self.identity.query_params());

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::EndomondoApi(format!("Auth request failed: {}", e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::EndomondoApi(format!("Failed to read auth response: {}", e)))?;

        let token = parse_auth_response(&body)?;
        tracing::info!(email, "Authenticated with Endomondo");

        self.auth_token = Some(token.clone());
        Ok(token)
    }

    /// Return the cached token, logging in with stored credentials if needed.
    pub async fn token(&mut self) -> Result<String> {
        if let Some(token) = &self.auth_token {
            return Ok(token.clone());
        }

        let Some(credentials) = self.credentials.clone() else {
            return Err(AppError::Authentication(
                "No auth token and no stored credentials".to_string(),
            ));
        };

        self.authenticate(&credentials.email, &credentials.password)
            .await
    }

    // ─── Authenticated Requests ──────────────────────────────────

    /// GET an API path with the token and `language=EN` appended.
    ///
    /// Any non-success status becomes [`AppError::Request`]. The URL in the
    /// error omits the query string so the token is not leaked.
    pub async fn request(
        &mut self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response> {
        let token = self.token().await?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("authToken", token.as_str()), ("language", "EN")])
            .send()
            .await
            .map_err(|e| AppError::EndomondoApi(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "Could not retrieve URL");
            return Err(AppError::Request {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response)
    }

    /// List workouts, newest first as the server orders them.
    ///
    /// Records are returned verbatim; the list is capped at `max_results`.
    pub async fn list_workouts(
        &mut self,
        max_results: u32,
        before: Option<Before>,
    ) -> Result<Vec<WorkoutRecord>> {
        let mut params = vec![("maxResults", max_results.to_string())];
        if let Some(before) = &before {
            params.push(("before", before.to_param()));
        }

        let response = self.request(WORKOUTS_PATH, &params).await?;

        let body: WorkoutListResponse = response
            .json()
            .await
            .map_err(|e| AppError::EndomondoApi(format!("JSON parse error: {}", e)))?;

        let mut workouts: Vec<WorkoutRecord> =
            body.data.into_iter().map(WorkoutRecord::new).collect();
        workouts.truncate(max_results as usize);

        tracing::debug!(count = workouts.len(), "Fetched workout list");
        Ok(workouts)
    }
}

fn build_http_client(
    identity: &Identity,
    timeout: Option<std::time::Duration>,
) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(identity.user_agent());
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| AppError::EndomondoApi(format!("Failed to build HTTP client: {}", e)))
}

/// Parse the plain-text pairing response.
///
/// The first line must be `OK`; the token is the value of the `authToken=`
/// line that follows. Lines without `=` are ignored.
pub fn parse_auth_response(body: &str) -> Result<String> {
    let mut lines = body.split('\n').map(|line| line.trim_end_matches('\r'));

    let status = lines.next().unwrap_or_default();
    if status != "OK" {
        return Err(AppError::Authentication(format!(
            "Expected 'OK', got '{}'",
            status
        )));
    }

    lines
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| *key == "authToken")
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| AppError::Authentication("No authToken in auth response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_parse_auth_response_returns_token() {
        let token = parse_auth_response("OK\nauthToken=ABC123\n").unwrap();
        assert_eq!(token, "ABC123");
    }

    #[test]
    fn test_parse_auth_response_among_other_keys() {
        let body = "OK\r\naction=PAIRED\r\nauthToken=XYZ\r\nmeasure=METRIC\r\n";
        assert_eq!(parse_auth_response(body).unwrap(), "XYZ");
    }

    #[test]
    fn test_parse_auth_response_rejects_failure_line() {
        let err = parse_auth_response("FAIL\n").unwrap_err();
        match err {
            AppError::Authentication(msg) => assert!(msg.contains("FAIL")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_auth_response_missing_token_is_error() {
        let err = parse_auth_response("OK\nfoo=bar\n").unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));

        let err = parse_auth_response("").unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn test_before_timestamp_is_normalized_to_utc() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2014, 3, 1, 22, 30, 0).unwrap();
        assert_eq!(Before::from(at).to_param(), "2014-03-02 03:30:00 UTC");
    }

    #[test]
    fn test_before_string_passes_through() {
        let before = Before::from("2014-03-02 03:30:00 UTC");
        assert_eq!(before.to_param(), "2014-03-02 03:30:00 UTC");
    }

    #[test]
    fn test_before_from_str() {
        let parsed: Before = "2014-03-01T22:30:00-05:00".parse().unwrap();
        assert_eq!(parsed.to_param(), "2014-03-02 03:30:00 UTC");

        let parsed: Before = "2014-03-02 03:30:00 UTC".parse().unwrap();
        assert_eq!(parsed, Before::Formatted("2014-03-02 03:30:00 UTC".to_string()));

        let err = "1393731000".parse::<Before>().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = "yesterday".parse::<Before>().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_identity_is_stable_per_host() {
        let a = Identity::for_host("archive-box");
        let b = Identity::for_host("archive-box");
        let c = Identity::for_host("other-box");

        assert_eq!(a.device_id, b.device_id);
        assert_ne!(a.device_id, c.device_id);
        assert_eq!(
            a.user_agent(),
            "Dalvik/1.4.0 (Linux; U; Android 2.3.7; HTC Vision Build/GRI40)"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let client = EndomondoClient::new("http://localhost", Identity::for_host("h"))
            .unwrap()
            .with_credentials("runner@example.com", "hunter2");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("hunter2"));
    }
}
