//! index_submit library: notify search engines of changed URLs
//!
//! URLs are submitted to the Bing Webmaster URL Submission API (metered by a
//! daily quota) or to IndexNow (push protocol). When the Bing API fails with a
//! recoverable code (400, 402, 429, or a transport failure) the same batch is
//! retried once through IndexNow. Every outcome is appended, one record per
//! URL, to an append-only SQLite log.
//!
//! # Example
//!
//! ```no_run
//! use index_submit::initialization::init_app_state;
//! use index_submit::{manual_submit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     site_url: "https://www.example.com".into(),
//!     indexnow_key: Some("0123456789abcdef0123456789abcdef".into()),
//!     ..Default::default()
//! };
//!
//! let state = init_app_state(&config).await?;
//! let outcome = manual_submit(
//!     &state.orchestrator,
//!     "https://www.example.com/a\nhttps://www.example.com/b",
//!     "indexnow",
//! )
//! .await?;
//! println!("{} via {}: {}", outcome.status, outcome.method.label(), outcome.message);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod channel;
pub mod config;
pub mod credentials;
pub mod dedup;
pub mod entry;
pub mod error_handling;
pub mod initialization;
pub mod orchestrator;
pub mod quota;
pub mod service;
pub mod storage;
mod utils;

// Re-export public API
pub use channel::{BingClient, ChannelResult, IndexNowClient, MeteredChannel, PushChannel};
pub use config::{Config, LogFormat, LogLevel};
pub use credentials::{generate_indexnow_key, Credentials};
pub use entry::{bulk_submit, chunk_urls, manual_submit, parse_url_text, PublishHook};
pub use error_handling::{DatabaseError, SubmitError};
pub use orchestrator::{Channel, Orchestrator, SubmissionOutcome, SubmissionSet, Trigger};
pub use quota::{QuotaSnapshot, QuotaTracker, QuotaView};
pub use service::{router, start_service, AppState};
pub use storage::{
    init_db_pool, page, rolling_stats, run_migrations, LogPage, RollingStats, SubmissionMethod,
    SubmissionRecord, SubmissionStatus,
};
