// storage/models.rs
// Submission log models

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error_handling::display_message;

/// Final status of one submission attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr, EnumIter,
)]
pub enum SubmissionStatus {
    Success,
    Failed,
}

impl SubmissionStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            SubmissionStatus::Success
        } else {
            SubmissionStatus::Failed
        }
    }

    pub fn is_success(self) -> bool {
        self == SubmissionStatus::Success
    }
}

/// Which channel(s) a submission went through.
///
/// Stored by variant name; [`SubmissionMethod::label`] is the short form shown
/// to operators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr, EnumIter,
)]
pub enum SubmissionMethod {
    /// Bing API only (succeeded, or failed terminally)
    ApiDirect,
    /// IndexNow was the requested channel
    IndexNowDirect,
    /// Bing API was requested but IndexNow carried the batch
    ApiFallbackToIndexNow,
    /// Bing API failed with a fallback-eligible code and IndexNow failed too
    ApiAndIndexNowBothFailed,
}

impl SubmissionMethod {
    pub fn label(self) -> &'static str {
        match self {
            SubmissionMethod::ApiDirect => "API",
            SubmissionMethod::IndexNowDirect => "IndexNow",
            SubmissionMethod::ApiFallbackToIndexNow => "API->IndexNow",
            SubmissionMethod::ApiAndIndexNowBothFailed => "API&IndexNow Fail",
        }
    }
}

/// A submission outcome about to be appended. The timestamp is assigned by
/// the store at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub url: String,
    pub status: SubmissionStatus,
    pub message: String,
    pub method: SubmissionMethod,
}

/// One row of the submission log. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub id: i64,
    /// Creation time, milliseconds since Unix epoch (server clock)
    pub created_at_ms: i64,
    /// Submitted URL, truncated for storage
    pub url: String,
    pub status: SubmissionStatus,
    /// Diagnostic as stored
    pub message: String,
    pub method: SubmissionMethod,
}

impl SubmissionRecord {
    /// The stored diagnostic mapped to its operator-facing phrase.
    pub fn display_message(&self) -> String {
        display_message(&self.message)
    }
}

/// One page of the submission log, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogPage {
    pub records: Vec<SubmissionRecord>,
    /// Requested page after clamping to >= 1
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

/// Submission counts over a trailing window.
///
/// `success + failed == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RollingStats {
    pub total: i64,
    pub success: i64,
    pub failed: i64,
}
