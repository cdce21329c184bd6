//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the application,
//! including upstream endpoints, timeouts, storage limits, and quota thresholds.

use std::time::Duration;

pub const DB_PATH: &str = "./index_submit.db";

// Upstream endpoints
/// Bing Webmaster URL Submission API (batch endpoint, consumes daily quota)
pub const BING_SUBMIT_ENDPOINT: &str =
    "https://ssl.bing.com/webmaster/api.svc/json/SubmitUrlbatch";
/// Bing Webmaster quota query endpoint
pub const BING_QUOTA_ENDPOINT: &str =
    "https://ssl.bing.com/webmaster/api.svc/json/GetUrlSubmissionQuota";
/// IndexNow push endpoint (no quota)
pub const INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";

// Network operation timeouts
/// Timeout for a single batch submission on either channel, in seconds
pub const SUBMIT_TIMEOUT_SECS: u64 = 45;
/// Timeout for a quota query, in seconds
pub const QUOTA_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent string for outbound requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("index_submit/", env!("CARGO_PKG_VERSION"));

// Storage limits
/// Maximum stored URL length in characters. Applied at storage time only;
/// the full URL is always what gets submitted upstream.
pub const MAX_URL_LENGTH: usize = 500;
/// Maximum stored diagnostic message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 500;

// Log read path
/// Number of records per log page
pub const LOG_PAGE_SIZE: u32 = 10;
/// Trailing window for rolling submission statistics, in hours
pub const STATS_WINDOW_HOURS: i64 = 24;

// Quota classification
/// Daily limit reported for high-volume accounts
pub const QUOTA_HIGH_TIER_LIMIT: i64 = 10_000;
/// Daily limit reported for standard accounts
pub const QUOTA_STANDARD_LIMIT: i64 = 100;
/// A reported remaining quota above this value implies the high-volume tier
pub const QUOTA_TIER_THRESHOLD: i64 = 100;
/// Sentinel for "quota unknown / service unreachable"
pub const QUOTA_UNKNOWN: i64 = -1;
/// Below this many remaining submissions the quota is considered low and
/// callers should suggest switching to IndexNow.
pub const LOW_QUOTA_THRESHOLD: i64 = 5;

/// Metered-channel failure codes that trigger an IndexNow fallback:
/// 400 bad request, 402 quota exceeded, 429 rate limited, 0 transport failure.
pub const FALLBACK_STATUS_CODES: &[u16] = &[400, 402, 429, 0];

/// Status code used for transport-level failures (timeout, DNS, connect)
pub const TRANSPORT_FAILURE_CODE: u16 = 0;

// Deduplication
/// How long an automatic submission for one resource suppresses repeats
pub const DEDUP_TTL: Duration = Duration::from_secs(30);

// Entry points
/// Number of URLs per batch for site-wide bulk submissions
pub const BULK_CHUNK_SIZE: usize = 50;
/// Length of a generated IndexNow key
pub const INDEXNOW_KEY_LENGTH: usize = 32;
/// Resource status that triggers an automatic submission
pub const PUBLISHED_STATUS: &str = "publish";

// HTTP service
/// Default port for the `serve` subcommand
pub const DEFAULT_SERVICE_PORT: u16 = 8787;
