//! Publish event handler.

use axum::{extract::State, Json};
use log::debug;

use super::super::types::{ApiError, AppState, PublishRequest, PublishResponse};

/// `POST /publish`, called by the content layer on every status transition
pub async fn publish_handler(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, ApiError> {
    debug!(
        "Status transition for resource {}: {:?} -> {:?}",
        request.resource_id, request.old_status, request.new_status
    );

    let outcome = state
        .publish
        .on_status_transition(&request.resource_id, &request.url, &request.new_status)
        .await?;

    Ok(Json(PublishResponse {
        triggered: outcome.is_some(),
        outcome: outcome.map(Into::into),
    }))
}
