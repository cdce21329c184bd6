// Shared test helpers for integration tests.
//
// Each test gets its own mock upstream (Bing and IndexNow on one wiremock
// server) and its own SQLite file in a temporary directory.

use index_submit::initialization::init_app_state;
use index_submit::{AppState, Config};
use tempfile::TempDir;
use wiremock::MockServer;

pub const SITE_URL: &str = "https://blog.example";
pub const INDEXNOW_KEY: &str = "0123456789abcdef0123456789abcdef";

/// Configuration pointing both channels at `server` and the log at `dir`.
pub fn test_config(server: &MockServer, dir: &TempDir, api_key: Option<&str>) -> Config {
    Config {
        site_url: SITE_URL.to_string(),
        api_key: api_key.map(str::to_string),
        indexnow_key: Some(INDEXNOW_KEY.to_string()),
        bing_endpoint: format!("{}/SubmitUrlbatch", server.uri()),
        bing_quota_endpoint: format!("{}/GetUrlSubmissionQuota", server.uri()),
        indexnow_endpoint: format!("{}/indexnow", server.uri()),
        submit_timeout_seconds: 2,
        quota_timeout_seconds: 5,
        db_path: dir.path().join("index_submit.db"),
        ..Default::default()
    }
}

/// Builds the full application state against the mock upstream.
#[allow(dead_code)] // Not every test file uses every helper
pub async fn test_state(server: &MockServer, dir: &TempDir, api_key: Option<&str>) -> AppState {
    init_app_state(&test_config(server, dir, api_key))
        .await
        .expect("Failed to initialize application state")
}

/// Number of requests the mock server received on `path`.
#[allow(dead_code)]
pub async fn hits(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == path)
        .count()
}
