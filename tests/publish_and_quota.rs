//! Publish hook, quota, and credential tests against mock upstreams.

mod helpers;

use helpers::{hits, test_state};
use index_submit::{SubmissionMethod, SubmitError};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_quota(server: &MockServer, key: &str, daily: i64) {
    Mock::given(method("GET"))
        .and(path("/GetUrlSubmissionQuota"))
        .and(query_param("apikey", key))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "d": { "__type": "UrlSubmissionQuota", "DailyQuota": daily, "MonthlyQuota": 2_800 }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_publish_submits_once_per_window() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("temp dir");
    Mock::given(method("POST"))
        .and(path("/SubmitUrlbatch"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let state = test_state(&server, &dir, Some("key-1")).await;

    let first = state
        .publish
        .on_status_transition("42", "https://blog.example/hello", "publish")
        .await
        .expect("first");
    let second = state
        .publish
        .on_status_transition("42", "https://blog.example/hello", "publish")
        .await
        .expect("second");

    let outcome = first.expect("first trigger submits");
    assert_eq!(outcome.method, SubmissionMethod::ApiDirect);
    assert_eq!(outcome.message, "Auto Publish (API)");
    assert!(second.is_none());
    assert_eq!(hits(&server, "/SubmitUrlbatch").await, 1);
}

#[tokio::test]
async fn test_draft_transition_does_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("temp dir");
    let state = test_state(&server, &dir, Some("key-1")).await;

    let result = state
        .publish
        .on_status_transition("42", "https://blog.example/hello", "draft")
        .await
        .expect("ignored");
    assert!(result.is_none());
    assert!(server
        .received_requests()
        .await
        .unwrap_or_default()
        .is_empty());
}

#[tokio::test]
async fn test_quota_tiers() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("temp dir");
    mock_quota(&server, "standard", 80).await;
    mock_quota(&server, "high", 9_000).await;
    let state = test_state(&server, &dir, None).await;

    let standard = state.quota.fetch_quota("standard").await;
    assert_eq!((standard.remaining, standard.limit), (80, 100));
    assert_eq!(standard.monthly, Some(2_800));

    let high = state.quota.fetch_quota("high").await;
    assert_eq!((high.remaining, high.limit), (9_000, 10_000));
}

#[tokio::test]
async fn test_quota_unreachable_is_unknown() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("temp dir");
    Mock::given(method("GET"))
        .and(path("/GetUrlSubmissionQuota"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let state = test_state(&server, &dir, None).await;

    let snapshot = state.quota.fetch_quota("key-1").await;
    assert!(!snapshot.success);
    assert_eq!(snapshot.remaining, -1);
    assert!(!snapshot.is_low());
}

#[tokio::test]
async fn test_credential_validated_before_use() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("temp dir");
    mock_quota(&server, "good", 50).await;
    Mock::given(method("GET"))
        .and(path("/GetUrlSubmissionQuota"))
        .and(query_param("apikey", "bad"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let state = test_state(&server, &dir, None).await;

    let rejected = state.credentials.set_api_key("bad", &state.quota).await;
    assert!(matches!(rejected, Err(SubmitError::InvalidCredential)));
    assert!(!state.credentials.has_api_key());

    let accepted = state
        .credentials
        .set_api_key("good", &state.quota)
        .await
        .expect("valid key");
    assert_eq!(accepted.remaining, 50);
    assert_eq!(state.credentials.api_key().as_deref(), Some("good"));

    state.credentials.clear_api_key();
    assert!(!state.credentials.has_api_key());
}
