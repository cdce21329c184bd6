//! Submission log read paths: paging and rolling statistics.
//!
//! Both are pure reads; calling them twice with no append in between returns
//! identical results.

use std::str::FromStr;

use chrono::Duration;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::storage::models::{
    LogPage, RollingStats, SubmissionMethod, SubmissionRecord, SubmissionStatus,
};

/// Returns one page of records, newest first.
///
/// `page_number` is clamped to at least 1. A page past the end returns no
/// records (it is not clamped to the last page). `total_pages` is
/// `ceil(total_items / page_size)`, so an empty log has zero pages.
///
/// Count and rows are read in one transaction so they describe the same
/// snapshot even while appends are running.
pub async fn page(
    pool: &SqlitePool,
    page_number: i64,
    page_size: u32,
) -> Result<LogPage, DatabaseError> {
    let page_size = i64::from(page_size.max(1));
    let current_page = page_number.max(1);
    let offset = (current_page - 1).saturating_mul(page_size);

    let mut tx = pool.begin().await?;

    let total_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM submission_logs")
        .fetch_one(&mut *tx)
        .await?;

    let rows = sqlx::query(
        "SELECT id, created_at_ms, url, status, message, method
         FROM submission_logs
         ORDER BY created_at_ms DESC, id DESC
         LIMIT ? OFFSET ?",
    )
    .bind(page_size)
    .bind(offset)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    let records = rows
        .iter()
        .map(record_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LogPage {
        records,
        current_page,
        total_pages: (total_items + page_size - 1) / page_size,
        total_items,
    })
}

/// Counts records created within the trailing `window`, split by status.
pub async fn rolling_stats(
    pool: &SqlitePool,
    window: Duration,
) -> Result<RollingStats, DatabaseError> {
    rolling_stats_at(pool, window, chrono::Utc::now().timestamp_millis()).await
}

/// As [`rolling_stats`], relative to `now_ms`.
pub(crate) async fn rolling_stats_at(
    pool: &SqlitePool,
    window: Duration,
    now_ms: i64,
) -> Result<RollingStats, DatabaseError> {
    let since_ms = now_ms - window.num_milliseconds();

    let row = sqlx::query(
        "SELECT COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN status = 'Success' THEN 1 ELSE 0 END), 0) AS success
         FROM submission_logs
         WHERE created_at_ms > ?",
    )
    .bind(since_ms)
    .fetch_one(pool)
    .await?;

    let total: i64 = row.try_get("total")?;
    let success: i64 = row.try_get("success")?;

    Ok(RollingStats {
        total,
        success,
        failed: total - success,
    })
}

fn record_from_row(row: &SqliteRow) -> Result<SubmissionRecord, DatabaseError> {
    let status: String = row.try_get("status")?;
    let method: String = row.try_get("method")?;

    Ok(SubmissionRecord {
        id: row.try_get("id")?,
        created_at_ms: row.try_get("created_at_ms")?,
        url: row.try_get("url")?,
        status: SubmissionStatus::from_str(&status).map_err(|_| DatabaseError::CorruptValue {
            column: "status",
            value: status.clone(),
        })?,
        message: row.try_get("message")?,
        method: SubmissionMethod::from_str(&method).map_err(|_| DatabaseError::CorruptValue {
            column: "method",
            value: method.clone(),
        })?,
    })
}
