//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup and test data creation
//! used across storage, orchestrator, and service tests.

#[cfg(test)]
use sqlx::sqlite::SqlitePoolOptions;
#[cfg(test)]
use sqlx::SqlitePool;

#[cfg(test)]
use crate::storage::models::{NewSubmission, SubmissionMethod, SubmissionStatus};
#[cfg(test)]
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses a single-connection in-memory database for fast test execution.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// A Bing-direct record with message "OK".
#[cfg(test)]
pub fn new_submission(url: &str, status: SubmissionStatus) -> NewSubmission {
    NewSubmission {
        url: url.to_string(),
        status,
        message: "OK".to_string(),
        method: SubmissionMethod::ApiDirect,
    }
}

/// Inserts a record with an explicit timestamp, bypassing the append API.
#[cfg(test)]
pub async fn insert_at(pool: &SqlitePool, url: &str, status: &str, created_at_ms: i64) -> i64 {
    sqlx::query(
        "INSERT INTO submission_logs (created_at_ms, url, status, message, method)
         VALUES (?, ?, ?, 'OK', 'ApiDirect')",
    )
    .bind(created_at_ms)
    .bind(url)
    .bind(status)
    .execute(pool)
    .await
    .expect("Failed to insert test submission")
    .last_insert_rowid()
}
