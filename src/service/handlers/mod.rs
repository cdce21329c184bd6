//! Service HTTP handlers.

mod credential;
mod logs;
mod publish;
mod quota;
mod submit;

pub use credential::{clear_credential_handler, set_credential_handler};
pub use logs::logs_handler;
pub use publish::publish_handler;
pub use quota::quota_handler;
pub use submit::submit_handler;
