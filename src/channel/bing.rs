//! Bing Webmaster URL Submission API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChannelResult, MeteredChannel, RawQuota};
use crate::config::Config;

/// Request body for `SubmitUrlbatch`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitUrlBatchRequest<'a> {
    site_url: &'a str,
    url_list: &'a [String],
}

/// `GetUrlSubmissionQuota` wraps its payload in a `d` member.
#[derive(Deserialize)]
struct QuotaEnvelope {
    d: Option<QuotaBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct QuotaBody {
    daily_quota: i64,
    #[serde(default)]
    monthly_quota: Option<i64>,
}

/// Client for the metered Bing channel.
///
/// The API key is passed per call because it can be replaced or cleared at
/// runtime; everything else is fixed at construction.
#[derive(Debug, Clone)]
pub struct BingClient {
    client: reqwest::Client,
    submit_endpoint: String,
    quota_endpoint: String,
    site_url: String,
    submit_timeout: Duration,
    quota_timeout: Duration,
}

impl BingClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            submit_endpoint: config.bing_endpoint.clone(),
            quota_endpoint: config.bing_quota_endpoint.clone(),
            site_url: config.site_url.clone(),
            submit_timeout: Duration::from_secs(config.submit_timeout_seconds),
            quota_timeout: Duration::from_secs(config.quota_timeout_seconds),
        }
    }
}

#[async_trait]
impl MeteredChannel for BingClient {
    async fn submit_batch(&self, api_key: &str, urls: &[String]) -> ChannelResult {
        let body = SubmitUrlBatchRequest {
            site_url: &self.site_url,
            url_list: urls,
        };
        let response = self
            .client
            .post(&self.submit_endpoint)
            .query(&[("apikey", api_key)])
            .timeout(self.submit_timeout)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let code = resp.status().as_u16();
                if code == 200 {
                    ChannelResult::ok(code)
                } else {
                    ChannelResult::failure(code, format!("Err {code}"))
                }
            }
            Err(e) => ChannelResult::transport(&e),
        }
    }

    async fn query_quota(&self, api_key: &str) -> Option<RawQuota> {
        let response = self
            .client
            .get(&self.quota_endpoint)
            .query(&[("siteUrl", self.site_url.as_str()), ("apikey", api_key)])
            .timeout(self.quota_timeout)
            .send()
            .await
            .ok()?;

        // Error bodies don't carry `d`, so status is checked implicitly by the parse.
        let envelope: QuotaEnvelope = response
            .json()
            .await
            .ok()?;

        envelope.d.map(|body| RawQuota {
            daily: body.daily_quota,
            monthly: body.monthly_quota,
        })
    }
}
