//! Entry points into the orchestrator.
//!
//! - manual submission of newline-separated text, optionally chunked
//! - automatic submission when a resource is published

mod manual;
mod publish;

pub use manual::{bulk_submit, chunk_urls, manual_submit, parse_url_text};
pub use publish::PublishHook;
