//! Submission log handler.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Duration;

use super::super::types::{ApiError, AppState, LogsQuery, LogsResponse};
use crate::config::{LOG_PAGE_SIZE, STATS_WINDOW_HOURS};
use crate::error_handling::SubmitError;
use crate::storage::{page, rolling_stats};

/// `GET /logs?page=N`, newest first, with 24-hour statistics
pub async fn logs_handler(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>, ApiError> {
    let log_page = page(&state.pool, query.page_number(), LOG_PAGE_SIZE)
        .await
        .map_err(SubmitError::from)?;
    let stats = rolling_stats(&state.pool, Duration::hours(STATS_WINDOW_HOURS))
        .await
        .map_err(SubmitError::from)?;

    Ok(Json(LogsResponse {
        records: log_page.records.into_iter().map(Into::into).collect(),
        current_page: log_page.current_page,
        total_pages: log_page.total_pages,
        total_items: log_page.total_items,
        stats,
    }))
}
