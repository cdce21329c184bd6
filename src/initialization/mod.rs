//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - HTTP client used by both submission channels
//! - The state shared by the CLI and the HTTP service
//!
//! The database pool lives in `storage::pool`.

mod app;
mod client;
mod logger;

// Re-export public API
pub use app::init_app_state;
pub use client::init_client;
pub use logger::init_logger_with;
