//! Error handling and failure classification.
//!
//! This module provides:
//! - Error type definitions (initialization, database, submission input)
//! - Classification of Bing API failure codes into fallback-eligible or terminal
//! - Normalization of transport errors into short diagnostics
//! - Read-time mapping of stored diagnostics to user-facing phrases

mod categorization;
mod types;

// Re-export public API
pub use categorization::{
    classify_failure, display_message, transport_failure_message, FailureClass,
};
pub use types::{DatabaseError, InitializationError, SubmitError};
