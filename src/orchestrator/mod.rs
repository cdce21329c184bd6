//! Submission orchestration.
//!
//! Decides which channel carries a [`SubmissionSet`], applies the IndexNow
//! fallback when the Bing API fails in a recoverable way, and appends exactly
//! one log record per URL. The batch is atomic for outcome purposes: every URL
//! in a set shares the same status, method, and message.
//!
//! Decision table (requested channel → calls → method):
//!
//! | Requested | Bing key | Bing result            | IndexNow | Method                     |
//! |-----------|----------|------------------------|----------|----------------------------|
//! | indexnow  | -        | -                      | called   | `IndexNowDirect`           |
//! | api       | none     | -                      | called   | `ApiFallbackToIndexNow`    |
//! | api       | set      | 200                    | -        | `ApiDirect` (Success)      |
//! | api       | set      | 400/402/429/0          | ok       | `ApiFallbackToIndexNow`    |
//! | api       | set      | 400/402/429/0          | failed   | `ApiAndIndexNowBothFailed` |
//! | api       | set      | anything else          | -        | `ApiDirect` (Failed)       |

mod types;

pub use types::{Channel, SubmissionOutcome, SubmissionSet, Trigger};

use std::sync::Arc;

use log::{debug, info, warn};
use sqlx::SqlitePool;

use crate::channel::{MeteredChannel, PushChannel};
use crate::credentials::Credentials;
use crate::error_handling::{classify_failure, FailureClass, SubmitError};
use crate::storage::{append_batch, NewSubmission, SubmissionMethod, SubmissionStatus};

/// Status, method and message computed once per orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decision {
    status: SubmissionStatus,
    method: SubmissionMethod,
    message: String,
}

impl Decision {
    fn new(success: bool, method: SubmissionMethod, message: impl Into<String>) -> Self {
        Self {
            status: SubmissionStatus::from_success(success),
            method,
            message: message.into(),
        }
    }
}

/// The submission decision engine.
///
/// Stateless apart from its collaborators; cheap to clone and share across
/// concurrent requests.
#[derive(Clone)]
pub struct Orchestrator {
    metered: Arc<dyn MeteredChannel>,
    push: Arc<dyn PushChannel>,
    credentials: Arc<Credentials>,
    pool: SqlitePool,
}

impl Orchestrator {
    pub fn new(
        metered: Arc<dyn MeteredChannel>,
        push: Arc<dyn PushChannel>,
        credentials: Arc<Credentials>,
        pool: SqlitePool,
    ) -> Self {
        Self {
            metered,
            push,
            credentials,
            pool,
        }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Submits the set and records one outcome per URL.
    ///
    /// A failed submission is a normal result (`status == Failed`), not an
    /// error.
    ///
    /// # Errors
    ///
    /// - `SubmitError::EmptyUrlList` before any channel is contacted
    /// - `SubmitError::Storage` if the outcome could not be appended
    pub async fn submit(&self, set: &SubmissionSet) -> Result<SubmissionOutcome, SubmitError> {
        if set.urls().is_empty() {
            return Err(SubmitError::EmptyUrlList);
        }

        let decision = self.decide(set).await;

        let records: Vec<NewSubmission> = set
            .urls()
            .iter()
            .map(|url| NewSubmission {
                url: url.clone(),
                status: decision.status,
                method: decision.method,
                message: decision.message.clone(),
            })
            .collect();
        let record_ids = append_batch(&self.pool, &records).await?;

        info!(
            "Submitted {} URL(s) via {}: {} ({})",
            records.len(),
            decision.method.label(),
            decision.status,
            decision.message
        );

        Ok(SubmissionOutcome {
            status: decision.status,
            method: decision.method,
            message: decision.message,
            url_count: records.len(),
            record_ids,
        })
    }

    async fn decide(&self, set: &SubmissionSet) -> Decision {
        let urls = set.urls();
        let auto = set.trigger() == Trigger::AutoPublish;

        if set.channel() == Channel::IndexNow {
            debug!("Pushing {} URL(s) to IndexNow", urls.len());
            let res = self.push.submit_batch(urls).await;
            let message = if res.success {
                if auto {
                    "Auto Publish (IndexNow)".to_string()
                } else {
                    res.message
                }
            } else if res.message.is_empty() {
                "Unknown Error".to_string()
            } else {
                res.message
            };
            return Decision::new(res.success, SubmissionMethod::IndexNowDirect, message);
        }

        let Some(api_key) = self.credentials.api_key() else {
            // The caller asked for the API, so this is still recorded as a fallback.
            debug!("No Bing API key; pushing {} URL(s) to IndexNow", urls.len());
            let res = self.push.submit_batch(urls).await;
            return Decision::new(
                res.success,
                SubmissionMethod::ApiFallbackToIndexNow,
                format!("No API Key -> IndexNow: {}", res.message),
            );
        };

        debug!("Submitting {} URL(s) to the Bing API", urls.len());
        let res = self.metered.submit_batch(&api_key, urls).await;
        if res.success {
            let message = if auto { "Auto Publish (API)" } else { "OK" };
            return Decision::new(true, SubmissionMethod::ApiDirect, message);
        }

        let code = res.code;
        match classify_failure(code) {
            FailureClass::FallbackEligible => {
                warn!("Bing API failed with {code}, falling back to IndexNow");
                let fallback = self.push.submit_batch(urls).await;
                if fallback.success {
                    Decision::new(
                        true,
                        SubmissionMethod::ApiFallbackToIndexNow,
                        format!("API Err {code} -> IndexNow OK"),
                    )
                } else {
                    warn!(
                        "IndexNow fallback failed too ({}): {}",
                        fallback.code, fallback.message
                    );
                    Decision::new(
                        false,
                        SubmissionMethod::ApiAndIndexNowBothFailed,
                        format!("API {code} & IndexNow Fail: {}", fallback.message),
                    )
                }
            }
            FailureClass::Terminal => {
                warn!("Bing API failed with {code}; not eligible for fallback");
                Decision::new(
                    false,
                    SubmissionMethod::ApiDirect,
                    format!("API Fail: {}", res.message),
                )
            }
        }
    }
}
