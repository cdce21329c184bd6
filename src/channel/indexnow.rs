//! IndexNow push client.
//!
//! IndexNow verifies ownership by fetching `keyLocation` from the site. If that
//! file is missing the service answers 403; the client does not distinguish
//! that case from any other rejection.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{ChannelResult, PushChannel};
use crate::config::{Config, TRANSPORT_FAILURE_CODE};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexNowRequest<'a> {
    host: &'a str,
    key: &'a str,
    key_location: &'a str,
    url_list: &'a [String],
}

/// Client for the IndexNow push channel.
#[derive(Debug, Clone)]
pub struct IndexNowClient {
    client: reqwest::Client,
    endpoint: String,
    host: Option<String>,
    key: Option<String>,
    key_location: Option<String>,
    timeout: Duration,
}

impl IndexNowClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.indexnow_endpoint.clone(),
            host: config.site_host(),
            key: config.indexnow_key.clone(),
            key_location: config.key_location(),
            timeout: Duration::from_secs(config.submit_timeout_seconds),
        }
    }
}

#[async_trait]
impl PushChannel for IndexNowClient {
    async fn submit_batch(&self, urls: &[String]) -> ChannelResult {
        let (Some(key), Some(key_location)) = (self.key.as_deref(), self.key_location.as_deref())
        else {
            return ChannelResult::failure(TRANSPORT_FAILURE_CODE, "No IndexNow key configured");
        };
        let Some(host) = self.host.as_deref() else {
            return ChannelResult::failure(TRANSPORT_FAILURE_CODE, "Site URL has no host");
        };

        let body = IndexNowRequest {
            host,
            key,
            key_location,
            url_list: urls,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(resp) => match resp.status().as_u16() {
                code @ (200 | 202) => ChannelResult::ok(code),
                code => ChannelResult::failure(code, format!("IndexNow Err {code}")),
            },
            Err(e) => ChannelResult::transport(&e),
        }
    }
}
