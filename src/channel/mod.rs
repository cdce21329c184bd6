//! Submission channels.
//!
//! Two independent upstream services accept URL batches:
//! - the Bing Webmaster URL Submission API (metered: a daily quota per site)
//! - IndexNow (push protocol, no quota, needs a published verification key)
//!
//! Each client turns a URL list into exactly one outbound request and
//! normalizes whatever comes back into a [`ChannelResult`]. Clients do no logging
//! of their own, never touch the submission log, and never return `Err`:
//! transport failures are results with code 0.

mod bing;
#[cfg(test)]
pub(crate) mod fakes;
mod indexnow;

pub use bing::BingClient;
pub use indexnow::IndexNowClient;

use async_trait::async_trait;

use crate::config::TRANSPORT_FAILURE_CODE;
use crate::error_handling::transport_failure_message;

/// Normalized outcome of one batch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResult {
    /// Whether the upstream accepted the batch
    pub success: bool,
    /// HTTP status code, or 0 for transport-level failures
    pub code: u16,
    /// Short diagnostic (`OK`, `Err 402`, `Request timed out`, ...)
    pub message: String,
}

impl ChannelResult {
    /// An accepted batch.
    pub fn ok(code: u16) -> Self {
        Self {
            success: true,
            code,
            message: "OK".to_string(),
        }
    }

    /// A rejected batch or a failure before any response arrived.
    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
        }
    }

    /// A transport-level failure (timeout, DNS, connection refused).
    pub fn transport(error: &reqwest::Error) -> Self {
        Self::failure(TRANSPORT_FAILURE_CODE, transport_failure_message(error))
    }
}

/// Raw quota figures as reported by the metered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawQuota {
    /// Remaining submissions today
    pub daily: i64,
    /// Remaining submissions this month, when reported
    pub monthly: Option<i64>,
}

/// The quota-limited batch channel (Bing URL Submission API).
#[async_trait]
pub trait MeteredChannel: Send + Sync {
    /// Submits one batch authenticated with `api_key`.
    async fn submit_batch(&self, api_key: &str, urls: &[String]) -> ChannelResult;

    /// Queries the remaining quota. `None` when the query failed outright
    /// (transport error, non-success status, or an unparseable body).
    async fn query_quota(&self, api_key: &str) -> Option<RawQuota>;
}

/// The quota-free push channel (IndexNow).
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Submits one batch.
    async fn submit_batch(&self, urls: &[String]) -> ChannelResult;
}
