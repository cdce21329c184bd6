//! Database connection pool management.
//!
//! This module initializes and configures the SQLite connection pool with:
//! - WAL mode enabled so paged reads never block appends
//! - A busy timeout so concurrent appends wait instead of failing
//! - Automatic database file creation and migrations

use std::path::Path;
use std::time::Duration;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::storage::run_migrations;

const MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the submission log database at `db_path` and
/// applies pending migrations.
///
/// # Errors
///
/// Returns `DatabaseError::FileCreationError` if the parent directory does not
/// exist, and `SqlError` / `MigrationError` for connection or schema failures.
pub async fn init_db_pool(db_path: &Path) -> Result<SqlitePool, DatabaseError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            error!("Database directory does not exist: {}", parent.display());
            return Err(DatabaseError::FileCreationError(format!(
                "directory {} does not exist",
                parent.display()
            )));
        }
    }

    if db_path.exists() {
        info!("Using existing database {}", db_path.display());
    } else {
        info!("Creating database {}", db_path.display());
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    run_migrations(&pool).await.map_err(|e| {
        error!("Failed to run migrations: {e}");
        e
    })?;

    Ok(pool)
}
