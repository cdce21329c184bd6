//! Bing API quota tracking.
//!
//! The quota is never cached: every read queries the service. The Bing API
//! does not report the account's daily limit, so the tier is inferred from the
//! remaining value (see [`infer_limit`]).

use std::sync::Arc;

use log::warn;
use serde::Serialize;

use crate::channel::MeteredChannel;
use crate::config::{
    LOW_QUOTA_THRESHOLD, QUOTA_HIGH_TIER_LIMIT, QUOTA_STANDARD_LIMIT, QUOTA_TIER_THRESHOLD,
    QUOTA_UNKNOWN,
};

/// Point-in-time view of the Bing API quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaSnapshot {
    /// Whether the quota query succeeded
    pub success: bool,
    /// Remaining submissions today, or -1 when unknown
    pub remaining: i64,
    /// Daily limit for the inferred account tier
    pub limit: i64,
    /// Remaining submissions this month, when reported
    pub monthly: Option<i64>,
}

impl QuotaSnapshot {
    /// Snapshot for an unreachable service or an unparseable answer.
    ///
    /// `remaining` is the -1 sentinel, never 0: an unknown quota must not read
    /// as an exhausted one.
    pub fn unknown() -> Self {
        Self {
            success: false,
            remaining: QUOTA_UNKNOWN,
            limit: QUOTA_STANDARD_LIMIT,
            monthly: None,
        }
    }

    /// True when the quota is known and nearly used up.
    pub fn is_low(&self) -> bool {
        self.remaining != QUOTA_UNKNOWN && self.remaining < LOW_QUOTA_THRESHOLD
    }

    /// Remaining quota as a percentage of the limit, capped at 100. Zero when unknown.
    pub fn percent_remaining(&self) -> u8 {
        if self.remaining < 0 || self.limit <= 0 {
            return 0;
        }
        let percent = (self.remaining as f64 * 100.0 / self.limit as f64).round();
        percent.min(100.0) as u8
    }
}

/// Operator-facing quota summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaView {
    pub remaining: i64,
    pub limit: i64,
    pub monthly: Option<i64>,
    pub percent: u8,
    /// Suggest switching to IndexNow
    pub low: bool,
}

impl From<QuotaSnapshot> for QuotaView {
    fn from(snapshot: QuotaSnapshot) -> Self {
        Self {
            remaining: snapshot.remaining,
            limit: snapshot.limit,
            monthly: snapshot.monthly,
            percent: snapshot.percent_remaining(),
            low: snapshot.is_low(),
        }
    }
}

/// Infers the daily limit from the remaining quota.
///
/// More than 100 remaining can only happen on a high-volume account, so the
/// limit is 10000; otherwise the standard 100.
// TODO: use an explicit tier field if the quota endpoint ever exposes one.
pub fn infer_limit(remaining: i64) -> i64 {
    if remaining > QUOTA_TIER_THRESHOLD {
        QUOTA_HIGH_TIER_LIMIT
    } else {
        QUOTA_STANDARD_LIMIT
    }
}

/// Fetches and classifies the Bing API quota.
#[derive(Clone)]
pub struct QuotaTracker {
    channel: Arc<dyn MeteredChannel>,
}

impl QuotaTracker {
    pub fn new(channel: Arc<dyn MeteredChannel>) -> Self {
        Self { channel }
    }

    /// Queries the remaining quota for `api_key`.
    ///
    /// Never fails: an unreachable service or a malformed answer yields
    /// [`QuotaSnapshot::unknown`].
    pub async fn fetch_quota(&self, api_key: &str) -> QuotaSnapshot {
        match self.channel.query_quota(api_key).await {
            Some(raw) => QuotaSnapshot {
                success: true,
                remaining: raw.daily,
                limit: infer_limit(raw.daily),
                monthly: raw.monthly,
            },
            None => {
                warn!("Bing quota unavailable (invalid key or service unreachable)");
                QuotaSnapshot::unknown()
            }
        }
    }
}
