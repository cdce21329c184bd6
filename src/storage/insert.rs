//! Submission log inserts.
//!
//! The log is append-only: there is no update or delete path. URLs and
//! messages are truncated here, at storage time.

use sqlx::SqlitePool;

use crate::config::{MAX_MESSAGE_LENGTH, MAX_URL_LENGTH};
use crate::error_handling::DatabaseError;
use crate::storage::models::NewSubmission;
use crate::utils::truncate_chars;

const INSERT_SQL: &str =
    "INSERT INTO submission_logs (created_at_ms, url, status, message, method)
     VALUES (?, ?, ?, ?, ?)";

/// Appends one record stamped with the current time. Returns its id.
///
/// # Errors
///
/// Any storage failure is returned; nothing is swallowed.
pub async fn append(pool: &SqlitePool, record: &NewSubmission) -> Result<i64, DatabaseError> {
    let created_at_ms = chrono::Utc::now().timestamp_millis();
    let result = sqlx::query(INSERT_SQL)
        .bind(created_at_ms)
        .bind(truncate_chars(&record.url, MAX_URL_LENGTH))
        .bind(record.status.as_ref())
        .bind(stored_message(&record.message))
        .bind(record.method.as_ref())
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Appends all records of one orchestration in a single transaction, all
/// stamped with the same time. Either every record is written or none is.
pub async fn append_batch(
    pool: &SqlitePool,
    records: &[NewSubmission],
) -> Result<Vec<i64>, DatabaseError> {
    append_batch_at(pool, records, chrono::Utc::now().timestamp_millis()).await
}

/// As [`append_batch`], with an explicit timestamp.
pub(crate) async fn append_batch_at(
    pool: &SqlitePool,
    records: &[NewSubmission],
    created_at_ms: i64,
) -> Result<Vec<i64>, DatabaseError> {
    let mut tx = pool.begin().await?;
    let mut ids = Vec::with_capacity(records.len());

    for record in records {
        let result = sqlx::query(INSERT_SQL)
            .bind(created_at_ms)
            .bind(truncate_chars(&record.url, MAX_URL_LENGTH))
            .bind(record.status.as_ref())
            .bind(stored_message(&record.message))
            .bind(record.method.as_ref())
            .execute(&mut *tx)
            .await?;
        ids.push(result.last_insert_rowid());
    }

    tx.commit().await?;
    Ok(ids)
}

fn stored_message(message: &str) -> String {
    truncate_chars(message, MAX_MESSAGE_LENGTH)
}
