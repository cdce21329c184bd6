//! Service state, request bodies and response bodies.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;

use crate::channel::{MeteredChannel, PushChannel};
use crate::credentials::Credentials;
use crate::dedup::DedupGuard;
use crate::entry::PublishHook;
use crate::error_handling::SubmitError;
use crate::orchestrator::{Orchestrator, SubmissionOutcome};
use crate::quota::QuotaTracker;
use crate::storage::{RollingStats, SubmissionMethod, SubmissionRecord, SubmissionStatus};

/// Shared state for the service
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub publish: PublishHook,
    pub credentials: Arc<Credentials>,
    pub quota: QuotaTracker,
    pub pool: SqlitePool,
}

impl AppState {
    /// Wires the orchestrator, publish hook and quota tracker around shared
    /// channels and credentials.
    pub fn new(
        metered: Arc<dyn MeteredChannel>,
        push: Arc<dyn PushChannel>,
        credentials: Arc<Credentials>,
        pool: SqlitePool,
        dedup_ttl: Duration,
    ) -> Self {
        let orchestrator =
            Orchestrator::new(metered.clone(), push, credentials.clone(), pool.clone());
        let publish = PublishHook::new(orchestrator.clone(), Arc::new(DedupGuard::new(dedup_ttl)));
        Self {
            orchestrator,
            publish,
            credentials,
            quota: QuotaTracker::new(metered),
            pool,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Newline-separated URLs
    pub urls: String,
    pub channel: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub method: SubmissionMethod,
    pub url_count: usize,
}

impl From<SubmissionOutcome> for SubmitResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            message: outcome.message,
            method: outcome.method,
            url_count: outcome.url_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub resource_id: String,
    pub url: String,
    pub new_status: String,
    #[serde(default)]
    pub old_status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SubmitResponse>,
}

/// Query string of `GET /logs`. `page` is kept as text so a malformed value
/// falls back to the first page instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub page: Option<String>,
}

impl LogsQuery {
    pub fn page_number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// One log row as shown to operators.
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub created_at_ms: i64,
    pub url: String,
    pub status: SubmissionStatus,
    pub method: SubmissionMethod,
    pub method_label: &'static str,
    /// Display category of the stored diagnostic
    pub message: String,
}

impl From<SubmissionRecord> for LogEntry {
    fn from(record: SubmissionRecord) -> Self {
        Self {
            message: record.display_message(),
            id: record.id,
            created_at_ms: record.created_at_ms,
            url: record.url,
            status: record.status,
            method: record.method,
            method_label: record.method.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub records: Vec<LogEntry>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub stats: RollingStats,
}

#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    pub key: String,
}

/// Handler error, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub SubmitError);

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.0.is_input_error() {
            log::error!("{}", self.0);
        }
        let status = match &self.0 {
            SubmitError::EmptyUrlList | SubmitError::UnknownChannel(_) => StatusCode::BAD_REQUEST,
            SubmitError::MissingCredential => StatusCode::CONFLICT,
            SubmitError::InvalidCredential => StatusCode::UNPROCESSABLE_ENTITY,
            SubmitError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
