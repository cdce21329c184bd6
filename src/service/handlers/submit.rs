//! Manual submission handler.

use axum::{extract::State, Json};

use super::super::types::{ApiError, AppState, SubmitRequest, SubmitResponse};
use crate::entry::manual_submit;

/// `POST /submit` with `{urls, channel}`
pub async fn submit_handler(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let outcome = manual_submit(&state.orchestrator, &request.urls, &request.channel).await?;
    Ok(Json(outcome.into()))
}
