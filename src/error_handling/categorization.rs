//! Failure classification and display categories.
//!
//! This module decides which metered-channel failures are eligible for an
//! IndexNow fallback, normalizes transport errors into short diagnostics, and
//! maps stored diagnostics to user-facing phrases at read time.

use crate::config::FALLBACK_STATUS_CODES;
use crate::utils::sanitize_message;

/// What the orchestrator should do after a failed Bing API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Bad request, quota exhausted, rate limited, or transport failure:
    /// retry the same batch through IndexNow.
    FallbackEligible,
    /// Anything else (401, 5xx, unlisted codes): record the failure as is.
    Terminal,
}

/// Classifies a metered-channel failure code.
///
/// Only the codes in `FALLBACK_STATUS_CODES` are fallback-eligible; every other
/// code is terminal, including codes we have never seen before.
pub fn classify_failure(code: u16) -> FailureClass {
    if FALLBACK_STATUS_CODES.contains(&code) {
        FailureClass::FallbackEligible
    } else {
        FailureClass::Terminal
    }
}

/// Produces a short diagnostic for a transport-level `reqwest::Error`.
///
/// The request URL is omitted: it carries the Bing API key in its query
/// string.
pub fn transport_failure_message(error: &reqwest::Error) -> String {
    let kind = if error.is_timeout() {
        "Request timed out"
    } else if error.is_connect() {
        "Connection failed"
    } else if error.is_redirect() {
        "Redirect error"
    } else if error.is_body() {
        "Request body error"
    } else if error.is_decode() {
        "Response decode error"
    } else if error.is_builder() {
        "Request builder error"
    } else if error.is_request() {
        "Request error"
    } else {
        "Transport error"
    };
    kind.to_string()
}

/// Maps a stored diagnostic to the phrase shown to operators.
///
/// Pure display transform; stored data is never rewritten. The first matching
/// rule wins, so a message mentioning several codes shows the first in this
/// order: 400, 401, 402, 429, timeout. Anything else is shown as stored, minus
/// control characters.
pub fn display_message(stored: &str) -> String {
    if stored.contains("400") {
        return "Err 400: bad request / quota issue".to_string();
    }
    if stored.contains("401") {
        return "Err 401: invalid API key".to_string();
    }
    if stored.contains("402") {
        return "Err 402: quota exhausted".to_string();
    }
    if stored.contains("429") {
        return "Err 429: rate limited".to_string();
    }
    let lower = stored.to_ascii_lowercase();
    if lower.contains("timed out") || lower.contains("timeout") {
        return "Connection timed out".to_string();
    }
    sanitize_message(stored)
}
