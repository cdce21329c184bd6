//! HTTP service for submissions, publish events, quota and the submission log.
//!
//! Routes:
//! - `POST /submit` - manual submission of newline-separated URLs
//! - `POST /publish` - status transition from the content layer
//! - `GET /quota` - remaining Bing API quota
//! - `GET /logs?page=N` - submission log page with 24-hour statistics
//! - `PUT /credential`, `DELETE /credential` - set or clear the Bing API key

mod handlers;
mod types;

use axum::routing::{get, post, put};
use axum::Router;

use handlers::{
    clear_credential_handler, logs_handler, publish_handler, quota_handler,
    set_credential_handler, submit_handler,
};
pub use types::AppState;

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/submit", post(submit_handler))
        .route("/publish", post(publish_handler))
        .route("/quota", get(quota_handler))
        .route("/logs", get(logs_handler))
        .route(
            "/credential",
            put(set_credential_handler).delete(clear_credential_handler),
        )
        .with_state(state)
}

/// Binds `bind:port` and serves until the process exits.
pub async fn start_service(bind: &str, port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((bind, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind service to {}:{}: {}", bind, port, e))?;

    log::info!("Service listening on http://{}:{}/", bind, port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Service error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::fakes::{FakeMetered, FakePush};
    use crate::channel::RawQuota;
    use crate::credentials::Credentials;
    use crate::storage::test_helpers::create_test_pool;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn state(metered: FakeMetered, push: FakePush, key: Option<&str>) -> AppState {
        AppState::new(
            Arc::new(metered),
            Arc::new(push),
            Arc::new(Credentials::new(key.map(str::to_string))),
            create_test_pool().await,
            Duration::from_secs(30),
        )
    }

    async fn call(
        state: &AppState,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = router(state.clone())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_submit_and_read_logs() {
        let state = state(FakeMetered::failing(402), FakePush::succeeding(), Some("key")).await;

        let (status, body) = call(
            &state,
            Method::POST,
            "/submit",
            Some(json!({
                "urls": "https://a.example/1\nhttps://a.example/2\nhttps://a.example/3",
                "channel": "api"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["method"], "ApiFallbackToIndexNow");
        assert_eq!(body["message"], "API Err 402 -> IndexNow OK");

        let (status, logs) = call(&state, Method::GET, "/logs?page=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(logs["total_items"], 3);
        assert_eq!(logs["total_pages"], 1);
        assert_eq!(logs["current_page"], 1);
        assert_eq!(logs["stats"]["total"], 3);
        assert_eq!(logs["stats"]["success"], 3);
        assert_eq!(logs["records"][0]["method_label"], "API->IndexNow");
        assert_eq!(logs["records"][0]["message"], "Err 402: quota exhausted");
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_input() {
        let state = state(FakeMetered::succeeding(), FakePush::succeeding(), None).await;

        let (status, body) = call(
            &state,
            Method::POST,
            "/submit",
            Some(json!({ "urls": "  \r\n ", "channel": "indexnow" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("empty"));

        let (_, logs) = call(&state, Method::GET, "/logs", None).await;
        assert_eq!(logs["total_items"], 0);
        assert_eq!(logs["total_pages"], 0);
    }

    #[tokio::test]
    async fn test_logs_with_malformed_page_shows_first_page() {
        let state = state(FakeMetered::succeeding(), FakePush::succeeding(), None).await;
        let (status, _) = call(
            &state,
            Method::POST,
            "/submit",
            Some(json!({ "urls": "https://a.example/1", "channel": "indexnow" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        for uri in ["/logs?page=abc", "/logs?page=", "/logs?page=2.5"] {
            let (status, logs) = call(&state, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(logs["current_page"], 1, "{uri}");
            assert_eq!(logs["total_items"], 1, "{uri}");
            assert_eq!(logs["records"][0]["url"], "https://a.example/1", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_channel() {
        let state = state(FakeMetered::succeeding(), FakePush::succeeding(), None).await;
        let (status, _) = call(
            &state,
            Method::POST,
            "/submit",
            Some(json!({ "urls": "https://a.example/1", "channel": "sitemap" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_publish_is_debounced() {
        let state = state(FakeMetered::succeeding(), FakePush::succeeding(), Some("key")).await;
        let event = json!({
            "resource_id": "42",
            "url": "https://a.example/post-42",
            "new_status": "publish",
            "old_status": "draft"
        });

        let (status, first) = call(&state, Method::POST, "/publish", Some(event.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["triggered"], true);
        assert_eq!(first["outcome"]["message"], "Auto Publish (API)");

        let (_, second) = call(&state, Method::POST, "/publish", Some(event)).await;
        assert_eq!(second["triggered"], false);
        assert!(second.get("outcome").is_none());
    }

    #[tokio::test]
    async fn test_quota_requires_credential() {
        let state = state(FakeMetered::succeeding(), FakePush::succeeding(), None).await;
        let (status, _) = call(&state, Method::GET, "/quota", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_quota_view() {
        let metered = FakeMetered::succeeding().with_quota(Some(RawQuota {
            daily: 3,
            monthly: Some(250),
        }));
        let state = state(metered, FakePush::succeeding(), Some("key")).await;

        let (status, body) = call(&state, Method::GET, "/quota", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining"], 3);
        assert_eq!(body["limit"], 100);
        assert_eq!(body["percent"], 3);
        assert_eq!(body["low"], true);
    }

    #[tokio::test]
    async fn test_quota_unknown_when_unreachable() {
        let metered = FakeMetered::succeeding().with_quota(None);
        let state = state(metered, FakePush::succeeding(), Some("key")).await;

        let (status, body) = call(&state, Method::GET, "/quota", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining"], -1);
        assert_eq!(body["low"], false);
    }

    #[tokio::test]
    async fn test_credential_lifecycle() {
        let state = state(FakeMetered::succeeding(), FakePush::succeeding(), None).await;

        let (status, body) = call(
            &state,
            Method::PUT,
            "/credential",
            Some(json!({ "key": "new-key" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining"], 100);
        assert_eq!(state.credentials.api_key().as_deref(), Some("new-key"));

        let (status, _) = call(&state, Method::DELETE, "/credential", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(!state.credentials.has_api_key());
    }

    #[tokio::test]
    async fn test_invalid_credential_is_rejected() {
        let metered = FakeMetered::succeeding().with_quota(None);
        let state = state(metered, FakePush::succeeding(), Some("old-key")).await;

        let (status, _) = call(
            &state,
            Method::PUT,
            "/credential",
            Some(json!({ "key": "bad-key" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.credentials.api_key().as_deref(), Some("old-key"));
    }
}
