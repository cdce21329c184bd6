//! Manual submission from operator-provided text.

use std::collections::HashSet;

use log::warn;
use url::ParseError;

use crate::error_handling::SubmitError;
use crate::orchestrator::{Channel, Orchestrator, SubmissionOutcome, SubmissionSet, Trigger};

/// Splits newline-separated text into distinct candidate URLs.
///
/// Any CR/LF combination separates entries (a `\r\n` pair yields an empty
/// entry, dropped like any other blank). Entries are trimmed, blanks dropped,
/// and duplicates removed keeping the first occurrence. An entry without a
/// scheme gets `http://`; entries that are still not `http`/`https` URLs are
/// skipped with a warning.
pub fn parse_url_text(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(validate_and_normalize_url)
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

fn validate_and_normalize_url(candidate: &str) -> Option<String> {
    let normalized = match url::Url::parse(candidate) {
        Err(ParseError::RelativeUrlWithoutBase) => format!("http://{candidate}"),
        _ => candidate.to_string(),
    };

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Some(normalized),
            _ => {
                warn!("Skipping unsupported scheme for URL: {candidate}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {candidate}");
            None
        }
    }
}

/// Splits a URL list into batches of at most `chunk_size` URLs.
///
/// A zero `chunk_size` is treated as 1.
pub fn chunk_urls(urls: &[String], chunk_size: usize) -> Vec<Vec<String>> {
    urls.chunks(chunk_size.max(1)).map(<[String]>::to_vec).collect()
}

/// Submits newline-separated URLs in batches of at most `chunk_size`, one
/// orchestration per batch. URLs are deduplicated across the whole text
/// before chunking.
///
/// Stops at the first storage failure; batches already submitted keep their
/// records.
///
/// # Errors
///
/// Same as [`manual_submit`].
pub async fn bulk_submit(
    orchestrator: &Orchestrator,
    text: &str,
    channel: &str,
    chunk_size: usize,
) -> Result<Vec<SubmissionOutcome>, SubmitError> {
    let channel = Channel::parse(channel)?;
    let all = SubmissionSet::new(parse_url_text(text), channel, Trigger::Manual)?;

    let mut outcomes = Vec::new();
    for chunk in chunk_urls(all.urls(), chunk_size) {
        let set = SubmissionSet::new(chunk, channel, Trigger::Manual)?;
        outcomes.push(orchestrator.submit(&set).await?);
    }
    Ok(outcomes)
}

/// Submits newline-separated URLs through `channel` (`"api"` or `"indexnow"`).
///
/// # Errors
///
/// - `SubmitError::UnknownChannel` for any other channel name
/// - `SubmitError::EmptyUrlList` when no usable URL remains
/// - `SubmitError::Storage` if the outcome could not be recorded
pub async fn manual_submit(
    orchestrator: &Orchestrator,
    text: &str,
    channel: &str,
) -> Result<SubmissionOutcome, SubmitError> {
    let channel = Channel::parse(channel)?;
    let set = SubmissionSet::new(parse_url_text(text), channel, Trigger::Manual)?;
    orchestrator.submit(&set).await
}
