//! Orchestration input and output types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error_handling::SubmitError;
use crate::storage::{SubmissionMethod, SubmissionStatus};

/// Channel requested by the caller.
///
/// Parsed from and rendered as `api` / `indexnow`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Channel {
    /// Bing URL Submission API, with IndexNow as fallback
    Api,
    /// IndexNow only
    IndexNow,
}

impl Channel {
    /// Parses a channel name from an external caller.
    pub fn parse(name: &str) -> Result<Self, SubmitError> {
        name.trim()
            .parse()
            .map_err(|_| SubmitError::UnknownChannel(name.to_string()))
    }
}

/// What caused the submission. Only changes the success message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Operator-initiated (bulk text or retry)
    Manual,
    /// A resource transitioned into the published state
    AutoPublish,
}

/// One unit of work for the orchestrator: distinct URLs and a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSet {
    urls: Vec<String>,
    channel: Channel,
    trigger: Trigger,
}

impl SubmissionSet {
    /// Builds a set from candidate URLs.
    ///
    /// Entries are trimmed, blanks dropped, and duplicates removed keeping the
    /// first occurrence.
    ///
    /// # Errors
    ///
    /// `SubmitError::EmptyUrlList` when nothing remains.
    pub fn new<I, S>(urls: I, channel: Channel, trigger: Trigger) -> Result<Self, SubmitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let urls: Vec<String> = urls
            .into_iter()
            .map(|u| u.as_ref().trim().to_string())
            .filter(|u| !u.is_empty())
            .filter(|u| seen.insert(u.clone()))
            .collect();

        if urls.is_empty() {
            return Err(SubmitError::EmptyUrlList);
        }

        Ok(Self {
            urls,
            channel,
            trigger,
        })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }
}

/// The single outcome of one orchestration, shared by every URL in the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub status: SubmissionStatus,
    pub method: SubmissionMethod,
    pub message: String,
    /// Number of records appended (one per URL)
    pub url_count: usize,
    /// Ids of the appended records, in URL order
    pub record_ids: Vec<i64>,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
