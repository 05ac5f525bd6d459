// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pace-Tracker command line
//!
//! Loads today's run-list feed (or the newest cached copy), prints the
//! summary report and optionally exports chart data.

use anyhow::Context;
use pace_tracker::{
    config::Config,
    report::{self, ChartData},
    services::{FeedIngestor, HttpFeedClient},
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err
                .downcast_ref::<pace_tracker::AppError>()
                .is_some_and(pace_tracker::AppError::is_no_data)
            {
                eprintln!("It appears no feed has been downloaded before!");
            }
            tracing::error!(error = ?err, "Run history unavailable");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        account_id = %config.account_id,
        cache_dir = %config.cache_dir.display(),
        start_offset = config.start_offset,
        "Starting Pace-Tracker"
    );

    let client = HttpFeedClient::new(config.feed_url.clone());
    let ingestor = FeedIngestor::from_config(&config, client)?;

    let today = chrono::Local::now().date_naive();
    let (resolved, history) = ingestor.load(today).await?;
    tracing::info!(file = %resolved.file_name, origin = ?resolved.origin, "Feed loaded");

    print!("{}", report::render_summary(&history));
    println!();
    print!("{}", report::render_day_totals(&history));

    if let Some(path) = &config.chart_export {
        ChartData::from_history(&history)
            .write_json(path)
            .with_context(|| format!("Failed to write chart data to {}", path.display()))?;
    }

    Ok(())
}

/// Initialize logging: JSON when `PACE_LOG_JSON` is set, compact text otherwise.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pace_tracker=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var_os("PACE_LOG_JSON").is_some() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
