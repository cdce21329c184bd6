//! Wiring of shared resources into the service state.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::channel::{BingClient, IndexNowClient, MeteredChannel, PushChannel};
use crate::config::Config;
use crate::credentials::Credentials;
use crate::initialization::init_client;
use crate::service::AppState;
use crate::storage::init_db_pool;

/// Opens the submission log, builds both channel clients and returns the
/// state shared by the CLI and the HTTP service.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated, or if the
/// HTTP client cannot be built.
pub async fn init_app_state(config: &Config) -> Result<AppState> {
    if config.site_host().is_none() {
        warn!(
            "Site URL {:?} has no host; Bing and IndexNow will reject submissions",
            config.site_url
        );
    }
    if config.indexnow_key.is_none() {
        info!("No IndexNow key configured; IndexNow submissions and fallbacks will fail");
    }

    let pool = init_db_pool(&config.db_path)
        .await
        .context("Failed to initialize submission log")?;
    let client = init_client(config).context("Failed to initialize HTTP client")?;

    let metered: Arc<dyn MeteredChannel> = Arc::new(BingClient::new(client.clone(), config));
    let push: Arc<dyn PushChannel> = Arc::new(IndexNowClient::new(client, config));
    let credentials = Arc::new(Credentials::new(config.api_key.clone()));

    Ok(AppState::new(
        metered,
        push,
        credentials,
        pool,
        config.dedup_ttl,
    ))
}
