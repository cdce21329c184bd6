//! Utilities for sanitizing and bounding diagnostic strings.
//!
//! Truncation bounds URLs and messages to the storage limits when they are
//! written. Control characters are stripped only when a message is displayed;
//! the log keeps them verbatim. Nothing here touches what gets submitted
//! upstream.

/// Removes control characters from a diagnostic message.
///
/// Control characters (0x00-0x1F, except tab/newline/carriage return, and DEL)
/// can break log output and the operator view.
pub fn sanitize_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Truncates `value` to at most `max_chars` characters.
///
/// Counts `char`s, not bytes, so multi-byte UTF-8 is never split.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => value[..byte_idx].to_string(),
        None => value.to_string(),
    }
}
