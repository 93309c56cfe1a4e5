// src/main.rs
use crate::config::{AppConfig, LoggingConfig};
use crate::connectors::yahoo::YahooClient;
use crate::portfolio::tracker::PortfolioTracker;
use crate::portfolio::weights::{owned_weights, TARGET_WEIGHTS};
use anyhow::{anyhow, Context};
use dotenvy::dotenv;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;

mod config;
mod connectors;
mod errors;
mod portfolio;
mod tui;
mod types;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Load Configuration
    let config = AppConfig::new().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging)?;

    info!("========================================");
    info!("       LIVE FOLIO - v{}", env!("CARGO_PKG_VERSION"));
    info!("========================================");
    info!(
        "Capital: {} | Instruments: {}",
        config.capital,
        TARGET_WEIGHTS
            .iter()
            .map(|(symbol, weight)| format!("{}={}", symbol, weight))
            .collect::<Vec<_>>()
            .join(", ")
    );

    // 2. Initialize Components
    let client = YahooClient::new(&config.price_source).context("Failed to build price client")?;
    let tracker = PortfolioTracker::new(
        Box::new(client),
        owned_weights(TARGET_WEIGHTS),
        config.capital,
    );

    // 3. Run the interface until the user quits
    tui::run(tracker, config.currency_symbol.clone()).await?;

    info!("Session ended");
    Ok(())
}

/// Logs go to a daily rolling file; the terminal belongs to the TUI.
fn init_tracing(settings: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let level = Level::from_str(&settings.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", settings.level, e))?;

    let file_appender = tracing_appender::rolling::daily(&settings.directory, &settings.file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(false)
        .init();

    Ok(guard)
}
