//! Bing API key handlers.

use axum::{extract::State, http::StatusCode, Json};

use super::super::types::{ApiError, AppState, CredentialRequest};
use crate::quota::QuotaView;

/// `PUT /credential`: validates the key against the quota endpoint, then stores it
pub async fn set_credential_handler(
    State(state): State<AppState>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<QuotaView>, ApiError> {
    let snapshot = state
        .credentials
        .set_api_key(&request.key, &state.quota)
        .await?;
    Ok(Json(snapshot.into()))
}

/// `DELETE /credential`
pub async fn clear_credential_handler(State(state): State<AppState>) -> StatusCode {
    state.credentials.clear_api_key();
    StatusCode::NO_CONTENT
}
