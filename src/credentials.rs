//! Runtime credential handling.
//!
//! The Bing API key can be replaced or cleared while the service runs, so it
//! lives behind a lock instead of in `Config`. Persisting it is left to the
//! caller.

use std::sync::{PoisonError, RwLock};

use log::info;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::config::INDEXNOW_KEY_LENGTH;
use crate::error_handling::SubmitError;
use crate::quota::{QuotaSnapshot, QuotaTracker};

/// Holder for the current Bing API key.
///
/// Not `Debug`, so the key cannot end up in logs by accident.
#[derive(Default)]
pub struct Credentials {
    api_key: RwLock<Option<String>>,
}

impl Credentials {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: RwLock::new(api_key.filter(|k| !k.trim().is_empty())),
        }
    }

    /// The current key, if any.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Validates `key` against the quota endpoint and stores it on success.
    ///
    /// The previous key stays in place when validation fails.
    ///
    /// # Errors
    ///
    /// `SubmitError::InvalidCredential` if the key is blank or cannot fetch quota.
    pub async fn set_api_key(
        &self,
        key: &str,
        tracker: &QuotaTracker,
    ) -> Result<QuotaSnapshot, SubmitError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(SubmitError::InvalidCredential);
        }

        let snapshot = tracker.fetch_quota(key).await;
        if !snapshot.success {
            return Err(SubmitError::InvalidCredential);
        }

        *self.api_key.write().unwrap_or_else(PoisonError::into_inner) = Some(key.to_string());
        info!("Bing API key accepted ({} submissions left today)", snapshot.remaining);
        Ok(snapshot)
    }

    /// Removes the key. Always succeeds.
    pub fn clear_api_key(&self) {
        *self.api_key.write().unwrap_or_else(PoisonError::into_inner) = None;
        info!("Bing API key cleared");
    }
}

/// Generates a fresh IndexNow key: 32 random ASCII letters and digits.
///
/// The key still has to be published at the key location before IndexNow
/// will accept submissions made with it.
pub fn generate_indexnow_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(INDEXNOW_KEY_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ChannelResult, MeteredChannel, RawQuota};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Accepts exactly one key.
    struct OneValidKey(&'static str);

    #[async_trait]
    impl MeteredChannel for OneValidKey {
        async fn submit_batch(&self, _api_key: &str, _urls: &[String]) -> ChannelResult {
            ChannelResult::ok(200)
        }

        async fn query_quota(&self, api_key: &str) -> Option<RawQuota> {
            (api_key == self.0).then_some(RawQuota {
                daily: 10,
                monthly: None,
            })
        }
    }

    fn tracker() -> QuotaTracker {
        QuotaTracker::new(Arc::new(OneValidKey("good")))
    }

    #[tokio::test]
    async fn test_valid_key_is_stored() {
        let credentials = Credentials::default();
        let snapshot = credentials
            .set_api_key("  good ", &tracker())
            .await
            .expect("key should validate");
        assert_eq!(snapshot.remaining, 10);
        assert_eq!(credentials.api_key().as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_invalid_key_is_rejected_and_previous_kept() {
        let credentials = Credentials::new(Some("good".into()));
        let result = credentials.set_api_key("bad", &tracker()).await;
        assert!(matches!(result, Err(SubmitError::InvalidCredential)));
        assert_eq!(credentials.api_key().as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_blank_key_is_rejected() {
        let credentials = Credentials::default();
        let result = credentials.set_api_key("   ", &tracker()).await;
        assert!(matches!(result, Err(SubmitError::InvalidCredential)));
        assert!(!credentials.has_api_key());
    }

    #[test]
    fn test_clear_is_unconditional() {
        let credentials = Credentials::new(Some("good".into()));
        credentials.clear_api_key();
        assert!(credentials.api_key().is_none());
        credentials.clear_api_key();
        assert!(!credentials.has_api_key());
    }

    #[test]
    fn test_blank_initial_key_is_absent() {
        assert!(!Credentials::new(Some(String::new())).has_api_key());
    }

    #[test]
    fn test_generate_indexnow_key() {
        let key = generate_indexnow_key();
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(key, generate_indexnow_key());
    }
}
