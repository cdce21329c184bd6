//! Utility functions.
//!
//! This module provides string sanitization and truncation used before
//! values are written to the submission log.

pub mod sanitize;

pub use sanitize::{sanitize_message, truncate_chars};
