//! Submission triggered by a resource being published.
//!
//! The content layer calls [`PublishHook::on_status_transition`] on every
//! status change; only transitions into the published state submit anything.

use std::sync::Arc;

use log::{debug, info};

use crate::config::PUBLISHED_STATUS;
use crate::dedup::DedupGuard;
use crate::error_handling::SubmitError;
use crate::orchestrator::{Channel, Orchestrator, SubmissionOutcome, SubmissionSet, Trigger};

/// Turns publish events into single-URL submissions via the Bing API.
#[derive(Clone)]
pub struct PublishHook {
    orchestrator: Orchestrator,
    guard: Arc<DedupGuard>,
}

impl PublishHook {
    pub fn new(orchestrator: Orchestrator, guard: Arc<DedupGuard>) -> Self {
        Self {
            orchestrator,
            guard,
        }
    }

    /// Handles a status change of `resource_id` to `new_status`.
    ///
    /// Returns `Ok(None)` when nothing was submitted: the new status is not the
    /// published one, the URL is blank, or another automatic submission for the
    /// same resource holds the dedup lock.
    ///
    /// # Errors
    ///
    /// Only `SubmitError::Storage`; channel failures are recorded outcomes.
    pub async fn on_status_transition(
        &self,
        resource_id: &str,
        url: &str,
        new_status: &str,
    ) -> Result<Option<SubmissionOutcome>, SubmitError> {
        if new_status != PUBLISHED_STATUS {
            debug!("Resource {resource_id} moved to {new_status:?}; not submitting");
            return Ok(None);
        }

        let set = match SubmissionSet::new([url], Channel::Api, Trigger::AutoPublish) {
            Ok(set) => set,
            Err(SubmitError::EmptyUrlList) => {
                debug!("Resource {resource_id} has no URL; not submitting");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if !self.guard.try_acquire(resource_id) {
            return Ok(None);
        }

        info!("Resource {resource_id} published, submitting {url}");
        self.orchestrator.submit(&set).await.map(Some)
    }
}
