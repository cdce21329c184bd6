//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `index_submit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use chrono::{Duration, Local, TimeZone};
use clap::Parser;
use tokio::io::AsyncReadExt;

use index_submit::config::{Command, Opt, LOG_PAGE_SIZE, STATS_WINDOW_HOURS};
use index_submit::initialization::{init_app_state, init_logger_with};
use index_submit::{
    bulk_submit, generate_indexnow_key, page, rolling_stats, start_service, AppState, QuotaView,
    SubmitError,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the current directory, then from next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(opt).await {
        eprintln!("index_submit error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(opt: Opt) -> Result<()> {
    if let Command::GenKey = opt.command {
        let key = generate_indexnow_key();
        println!("{key}");
        println!("Publish it as {key}.txt (containing only the key) at your site root.");
        return Ok(());
    }

    let config = opt.to_config();
    let state = init_app_state(&config).await?;

    match opt.command {
        Command::Serve { bind, port } => start_service(&bind, port, state).await,
        Command::Submit {
            file,
            channel,
            batch_size,
        } => submit(&state, file.as_deref(), &channel, batch_size).await,
        Command::Publish {
            resource_id,
            url,
            status,
        } => {
            match state
                .publish
                .on_status_transition(&resource_id, &url, &status)
                .await?
            {
                Some(outcome) => println!(
                    "{} via {}: {}",
                    outcome.status,
                    outcome.method.label(),
                    outcome.message
                ),
                None => println!("Nothing submitted for resource {resource_id}"),
            }
            Ok(())
        }
        Command::Logs { page: page_number } => logs(&state, page_number).await,
        Command::Quota => {
            let api_key = state
                .credentials
                .api_key()
                .ok_or(SubmitError::MissingCredential)?;
            print_quota(state.quota.fetch_quota(&api_key).await.into());
            Ok(())
        }
        Command::CheckKey { key } => {
            let snapshot = state.credentials.set_api_key(&key, &state.quota).await?;
            println!("Key accepted");
            print_quota(snapshot.into());
            Ok(())
        }
        Command::GenKey => Ok(()),
    }
}

async fn submit(
    state: &AppState,
    file: Option<&Path>,
    channel: &str,
    batch_size: usize,
) -> Result<()> {
    let text = match file {
        Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read URLs from stdin")?;
            text
        }
    };

    let outcomes = bulk_submit(&state.orchestrator, &text, channel, batch_size).await?;

    let (mut succeeded, mut failed) = (0usize, 0usize);
    for outcome in &outcomes {
        println!(
            "{} URL{} {} via {}: {}",
            outcome.url_count,
            if outcome.url_count == 1 { "" } else { "s" },
            outcome.status,
            outcome.method.label(),
            outcome.message
        );
        if outcome.is_success() {
            succeeded += outcome.url_count;
        } else {
            failed += outcome.url_count;
        }
    }

    println!(
        "Submitted {} URLs ({succeeded} succeeded, {failed} failed)",
        succeeded + failed
    );
    Ok(())
}

async fn logs(state: &AppState, page_number: i64) -> Result<()> {
    let log_page = page(&state.pool, page_number, LOG_PAGE_SIZE).await?;
    let stats = rolling_stats(&state.pool, Duration::hours(STATS_WINDOW_HOURS)).await?;

    println!(
        "Last {STATS_WINDOW_HOURS}h: {} total, {} succeeded, {} failed",
        stats.total, stats.success, stats.failed
    );
    for record in &log_page.records {
        let time = Local
            .timestamp_millis_opt(record.created_at_ms)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| record.created_at_ms.to_string());
        println!(
            "{time}  {:<7}  {:<17}  {}  {}",
            record.status.as_ref(),
            record.method.label(),
            record.url,
            record.display_message()
        );
    }
    println!(
        "Page {} of {} ({} records)",
        log_page.current_page, log_page.total_pages, log_page.total_items
    );
    Ok(())
}

fn print_quota(view: QuotaView) {
    if view.remaining < 0 {
        println!("Quota unknown (Bing API unreachable or key rejected)");
        return;
    }
    println!(
        "{} of {} submissions left today ({}%)",
        view.remaining, view.limit, view.percent
    );
    if let Some(monthly) = view.monthly {
        println!("{monthly} left this month");
    }
    if view.low {
        println!("Quota almost used up; consider submitting via IndexNow");
    }
}
