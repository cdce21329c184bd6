//! Command-line options.
//!
//! Parsed by `clap`; secrets may also come from the environment (or a `.env`
//! file loaded by the binary before parsing).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::constants::{
    BING_QUOTA_ENDPOINT, BING_SUBMIT_ENDPOINT, BULK_CHUNK_SIZE, DB_PATH, DEFAULT_SERVICE_PORT,
    DEFAULT_USER_AGENT, INDEXNOW_ENDPOINT, PUBLISHED_STATUS, QUOTA_TIMEOUT_SECS,
    SUBMIT_TIMEOUT_SECS,
};
use crate::config::types::{Config, LogFormat, LogLevel};

/// Command-line options and configuration.
///
/// # Examples
///
/// ```bash
/// # Submit URLs from a file through the Bing API (falls back to IndexNow)
/// index_submit --site-url https://blog.example submit urls.txt
///
/// # Push straight to IndexNow from stdin
/// cat urls.txt | index_submit --site-url https://blog.example submit --channel indexnow
///
/// # Serve the HTTP API
/// index_submit --site-url https://blog.example serve --port 8787
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "index_submit",
    about = "Submits changed URLs to Bing and IndexNow and records every outcome."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    #[arg(long, global = true, env = "INDEX_SUBMIT_DB_PATH", default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Site root URL, e.g. https://blog.example
    #[arg(long, global = true, env = "INDEX_SUBMIT_SITE_URL")]
    pub site_url: Option<String>,

    /// Bing Webmaster API key
    #[arg(long, global = true, env = "INDEX_SUBMIT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// IndexNow verification key
    #[arg(long, global = true, env = "INDEX_SUBMIT_INDEXNOW_KEY", hide_env_values = true)]
    pub indexnow_key: Option<String>,

    /// Public URL of the IndexNow key file (default: {site-url}/{key}.txt)
    #[arg(long, global = true)]
    pub indexnow_key_location: Option<String>,

    /// Bing batch submission endpoint
    #[arg(long, global = true, default_value = BING_SUBMIT_ENDPOINT, hide = true)]
    pub bing_endpoint: String,

    /// Bing quota endpoint
    #[arg(long, global = true, default_value = BING_QUOTA_ENDPOINT, hide = true)]
    pub bing_quota_endpoint: String,

    /// IndexNow endpoint
    #[arg(long, global = true, default_value = INDEXNOW_ENDPOINT, hide = true)]
    pub indexnow_endpoint: String,

    /// Per-request submission timeout in seconds
    #[arg(long, global = true, default_value_t = SUBMIT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Quota query timeout in seconds
    #[arg(long, global = true, default_value_t = QUOTA_TIMEOUT_SECS)]
    pub quota_timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API (submission, publish hook, quota, logs, credential)
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_SERVICE_PORT)]
        port: u16,
    },

    /// Submit URLs (one per line) from a file or stdin
    Submit {
        /// File to read; stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Channel: api|indexnow
        #[arg(long, default_value = "api")]
        channel: String,

        /// URLs per upstream batch
        #[arg(long, default_value_t = BULK_CHUNK_SIZE)]
        batch_size: usize,
    },

    /// Report a resource status transition (submits on publish)
    Publish {
        /// Resource identifier used for deduplication
        resource_id: String,

        /// Public URL of the resource
        url: String,

        /// New status of the resource
        #[arg(long, default_value = PUBLISHED_STATUS)]
        status: String,
    },

    /// Show a page of the submission log with 24h statistics
    Logs {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: i64,
    },

    /// Show remaining Bing API quota
    Quota,

    /// Validate a Bing API key against the quota endpoint
    CheckKey {
        /// Key to validate
        key: String,
    },

    /// Generate a new IndexNow key
    GenKey,
}

impl Opt {
    /// Builds the library configuration from parsed options.
    pub fn to_config(&self) -> Config {
        Config {
            site_url: self.site_url.clone().unwrap_or_default(),
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            indexnow_key: self.indexnow_key.clone().filter(|k| !k.trim().is_empty()),
            indexnow_key_location: self.indexnow_key_location.clone(),
            bing_endpoint: self.bing_endpoint.clone(),
            bing_quota_endpoint: self.bing_quota_endpoint.clone(),
            indexnow_endpoint: self.indexnow_endpoint.clone(),
            submit_timeout_seconds: self.timeout_seconds,
            quota_timeout_seconds: self.quota_timeout_seconds,
            user_agent: self.user_agent.clone(),
            db_path: self.db_path.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            ..Default::default()
        }
    }
}
