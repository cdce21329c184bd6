//! Error type definitions.
//!
//! Expected submission failures (quota exhausted, upstream rejected the batch,
//! both channels down) are *not* errors: they are recorded outcomes. The types
//! here cover input errors and the conditions that genuinely stop a request.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A stored row holds a value the current schema does not understand.
    #[error("Corrupt {column} value in submission log: {value:?}")]
    CorruptValue {
        /// Column name
        column: &'static str,
        /// Offending value
        value: String,
    },
}

/// Errors returned by the submission entry points and credential operations.
///
/// Input errors are rejected before any channel is contacted and are never
/// written to the submission log. `Storage` is the one hard failure: an outcome
/// that could not be recorded.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// No usable URL remained after parsing.
    #[error("URL list is empty")]
    EmptyUrlList,

    /// The channel name was neither `api` nor `indexnow`.
    #[error("Unknown channel {0:?} (expected \"api\" or \"indexnow\")")]
    UnknownChannel(String),

    /// The operation needs a Bing API key and none is configured.
    #[error("No Bing API key configured")]
    MissingCredential,

    /// The supplied Bing API key could not fetch quota.
    #[error("Bing API key is invalid or the Bing service is unreachable")]
    InvalidCredential,

    /// The outcome could not be written to the submission log.
    #[error("Failed to record submission outcome: {0}")]
    Storage(#[from] DatabaseError),
}

impl SubmitError {
    /// Whether the caller supplied bad input (as opposed to a server-side failure).
    pub fn is_input_error(&self) -> bool {
        !matches!(self, SubmitError::Storage(_))
    }
}
