// storage/mod.rs
// Submission log storage

pub mod insert;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod query;
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use insert::{append, append_batch};
pub use migrations::run_migrations;
pub use models::{
    LogPage, NewSubmission, RollingStats, SubmissionMethod, SubmissionRecord, SubmissionStatus,
};
pub use pool::init_db_pool;
pub use query::{page, rolling_stats};
