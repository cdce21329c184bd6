//! Configuration types.
//!
//! This module defines the logging enums and the library `Config` struct.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    BING_QUOTA_ENDPOINT, BING_SUBMIT_ENDPOINT, DB_PATH, DEDUP_TTL, DEFAULT_USER_AGENT,
    INDEXNOW_ENDPOINT, QUOTA_TIMEOUT_SECS, SUBMIT_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Everything the channel clients, the log store and the HTTP service need.
/// The Bing API key given here is only the *initial* credential; at runtime it
/// lives in [`crate::Credentials`] so it can be replaced or cleared.
///
/// # Examples
///
/// ```no_run
/// use index_submit::Config;
///
/// let config = Config {
///     site_url: "https://blog.example".to_string(),
///     indexnow_key: Some("0123456789abcdef0123456789abcdef".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.site_host().as_deref(), Some("blog.example"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Site root, e.g. `https://blog.example`
    pub site_url: String,

    /// Bing Webmaster API key, if one is configured at startup
    pub api_key: Option<String>,

    /// IndexNow verification key
    pub indexnow_key: Option<String>,

    /// Where IndexNow can fetch the key file. Defaults to `{site_url}/{key}.txt`.
    pub indexnow_key_location: Option<String>,

    /// Bing batch submission endpoint
    pub bing_endpoint: String,

    /// Bing quota endpoint
    pub bing_quota_endpoint: String,

    /// IndexNow endpoint
    pub indexnow_endpoint: String,

    /// Per-request timeout for submissions, in seconds
    pub submit_timeout_seconds: u64,

    /// Per-request timeout for quota queries, in seconds
    pub quota_timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Debounce window for publish-triggered submissions
    pub dedup_ttl: Duration,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            api_key: None,
            indexnow_key: None,
            indexnow_key_location: None,
            bing_endpoint: BING_SUBMIT_ENDPOINT.to_string(),
            bing_quota_endpoint: BING_QUOTA_ENDPOINT.to_string(),
            indexnow_endpoint: INDEXNOW_ENDPOINT.to_string(),
            submit_timeout_seconds: SUBMIT_TIMEOUT_SECS,
            quota_timeout_seconds: QUOTA_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            db_path: PathBuf::from(DB_PATH),
            dedup_ttl: DEDUP_TTL,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Host name of the site, as IndexNow expects it in the `host` field.
    pub fn site_host(&self) -> Option<String> {
        url::Url::parse(&self.site_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }

    /// Public location of the IndexNow key file.
    ///
    /// Returns the explicit override when set, otherwise `{site_url}/{key}.txt`.
    pub fn key_location(&self) -> Option<String> {
        if let Some(location) = &self.indexnow_key_location {
            return Some(location.clone());
        }
        let key = self.indexnow_key.as_deref()?;
        Some(format!("{}/{}.txt", self.site_url.trim_end_matches('/'), key))
    }
}
