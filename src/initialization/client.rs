//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Connect timeout shared by every outbound call. Request timeouts are set
/// per call by the channel clients (submission and quota differ).
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Initializes the HTTP client shared by the Bing and IndexNow clients.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - A connect timeout; whole-request timeouts are applied per request
/// - A bounded redirect policy (upstream APIs do not redirect in practice)
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(3))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
