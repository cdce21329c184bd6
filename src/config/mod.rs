//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timeouts, limits, thresholds)
//! - The library `Config` struct and logging enums
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Command, Opt};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
