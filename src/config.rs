// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local use.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the reports API
    pub api_base_url: String,
    /// Google Maps key, used only for static map links
    pub maps_api_key: Option<String>,
    /// Where the session (user + tokens) is persisted
    pub session_file: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Refresh expiring access tokens instead of forcing a new login
    pub token_auto_refresh: bool,
    /// Extra attempts for failed queries (transport and 5xx only)
    pub query_retry: u32,
    /// How long a cached query result is served without refetching
    pub query_stale_time: Duration,
    /// How long an unused query result is kept before eviction
    pub query_gc_time: Duration,
    /// Endpoint paths of the backend contract
    pub endpoints: Endpoints,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3333".to_string(),
            maps_api_key: None,
            session_file: PathBuf::from("session.json"),
            request_timeout: Duration::from_secs(30),
            token_auto_refresh: false,
            query_retry: 0,
            query_stale_time: Duration::ZERO,
            query_gc_time: Duration::from_secs(300),
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "http://localhost:3333".to_string());
        reqwest::Url::parse(&api_base_url)
            .map_err(|e| ConfigError::Invalid("API_BASE_URL", e.to_string()))?;

        let session_file = match env::var("SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };

        Ok(Self {
            api_base_url,
            maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            session_file,
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 30)?),
            token_auto_refresh: parse_var("TOKEN_AUTO_REFRESH", false)?,
            query_retry: parse_var("QUERY_RETRY", 0)?,
            query_stale_time: Duration::from_secs(parse_var("QUERY_STALE_SECS", 0)?),
            query_gc_time: Duration::from_secs(parse_var("QUERY_GC_SECS", 300)?),
            endpoints: Endpoints::default(),
        })
    }
}

/// Paths of every backend operation, relative to `api_base_url`.
///
/// `{id}` and `{code}` are substituted with URL-encoded values.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub login: String,
    pub refresh: String,
    pub logout: String,
    pub current_user: String,
    pub reports: String,
    pub report: String,
    pub track_report: String,
    pub report_status: String,
    pub assign_report: String,
    pub users: String,
    pub user: String,
    pub user_status: String,
    pub dashboard_metrics: String,
    pub dashboard_timeline: String,
    pub dashboard_heatmap: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/auth/token/".to_string(),
            refresh: "/auth/token/refresh/".to_string(),
            logout: "/auth/logout/".to_string(),
            current_user: "/auth/me/".to_string(),
            reports: "/reports".to_string(),
            report: "/reports/{id}".to_string(),
            track_report: "/reports/{code}/track".to_string(),
            report_status: "/reports/{id}/status".to_string(),
            assign_report: "/reports/{id}/assign".to_string(),
            users: "/users".to_string(),
            user: "/users/{id}".to_string(),
            user_status: "/users/{id}/status".to_string(),
            dashboard_metrics: "/dashboard/metrics".to_string(),
            dashboard_timeline: "/dashboard/reports-timeline".to_string(),
            dashboard_heatmap: "/dashboard/heatmap".to_string(),
        }
    }
}

/// Substitute `{name}` in an endpoint template with an encoded value.
pub fn fill(template: &str, name: &str, value: &str) -> String {
    template.replace(
        &format!("{{{}}}", name),
        urlencoding::encode(value).as_ref(),
    )
}

fn default_session_file() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("org", "civic-reports", "civic-reports")
        .map(|dirs| dirs.data_dir().join("session.json"))
        .ok_or(ConfigError::Missing("SESSION_FILE"))
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(name, e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
