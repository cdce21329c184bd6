//! In-process channel doubles for tests.
//!
//! Each fake returns a fixed result and records every batch it receives, so
//! tests can assert both the decision taken and how often each channel was hit.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ChannelResult, MeteredChannel, PushChannel, RawQuota};

/// Metered channel returning a fixed submission result and quota.
pub(crate) struct FakeMetered {
    result: ChannelResult,
    quota: Option<RawQuota>,
    batches: Mutex<Vec<Vec<String>>>,
    keys: Mutex<Vec<String>>,
}

impl FakeMetered {
    pub(crate) fn new(result: ChannelResult) -> Self {
        Self {
            result,
            quota: Some(RawQuota {
                daily: 100,
                monthly: Some(3_000),
            }),
            batches: Mutex::new(Vec::new()),
            keys: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn succeeding() -> Self {
        Self::new(ChannelResult::ok(200))
    }

    pub(crate) fn failing(code: u16) -> Self {
        Self::new(ChannelResult::failure(code, format!("Err {code}")))
    }

    pub(crate) fn with_quota(mut self, quota: Option<RawQuota>) -> Self {
        self.quota = quota;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub(crate) fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeteredChannel for FakeMetered {
    async fn submit_batch(&self, api_key: &str, urls: &[String]) -> ChannelResult {
        self.keys.lock().unwrap().push(api_key.to_string());
        self.batches.lock().unwrap().push(urls.to_vec());
        self.result.clone()
    }

    async fn query_quota(&self, _api_key: &str) -> Option<RawQuota> {
        self.quota
    }
}

/// Push channel returning a fixed result.
pub(crate) struct FakePush {
    result: ChannelResult,
    batches: Mutex<Vec<Vec<String>>>,
}

impl FakePush {
    pub(crate) fn new(result: ChannelResult) -> Self {
        Self {
            result,
            batches: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn succeeding() -> Self {
        Self::new(ChannelResult::ok(202))
    }

    pub(crate) fn failing(code: u16) -> Self {
        Self::new(ChannelResult::failure(code, format!("IndexNow Err {code}")))
    }

    pub(crate) fn calls(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub(crate) fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushChannel for FakePush {
    async fn submit_batch(&self, urls: &[String]) -> ChannelResult {
        self.batches.lock().unwrap().push(urls.to_vec());
        self.result.clone()
    }
}
