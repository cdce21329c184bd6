//! Quota handler.

use axum::{extract::State, Json};

use super::super::types::{ApiError, AppState};
use crate::error_handling::SubmitError;
use crate::quota::QuotaView;

/// `GET /quota`
///
/// Always queries Bing; an unreachable service yields `remaining = -1`.
pub async fn quota_handler(State(state): State<AppState>) -> Result<Json<QuotaView>, ApiError> {
    let api_key = state
        .credentials
        .api_key()
        .ok_or(SubmitError::MissingCredential)?;
    let snapshot = state.quota.fetch_quota(&api_key).await;
    Ok(Json(snapshot.into()))
}
