// =============================================================================
// Crossline — MA-crossover / RSI polling bot, main entry point
// =============================================================================
//
// The bot starts in Demo mode unless the config says otherwise: live trading
// requires an explicit `"account_mode": "Live"` plus API credentials in the
// environment.
// =============================================================================

mod config;
mod error;
mod execution;
mod indicators;
mod market_data;
mod scheduler;
mod signals;
mod strategy;
mod types;
mod venue;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::RuntimeConfig;
use crate::execution::ExecutionEngine;
use crate::types::AccountMode;
use crate::venue::BinanceClient;

const CONFIG_PATH: &str = "runtime_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Crossline starting up");

    let mut config = match RuntimeConfig::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "failed to load config, using defaults");
            let config = RuntimeConfig::default();
            // Persist the defaults so the next start loads a real file the
            // operator can edit.
            if let Err(e) = config.save(CONFIG_PATH) {
                warn!(error = %e, "could not persist default config");
            }
            config
        }
    };

    // Override symbols from env if available.
    if let Ok(syms) = std::env::var("CROSSLINE_SYMBOLS") {
        config.symbols = syms
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    config.validate()?;

    info!(
        symbols = ?config.symbols,
        interval = %config.interval,
        ma_short = config.ma_short,
        ma_long = config.ma_long,
        rsi_period = config.rsi_period,
        account_mode = %config.account_mode,
        "configuration ready"
    );

    // ── 2. Venue session ─────────────────────────────────────────────────
    let api_key = std::env::var("BINANCE_API_KEY").unwrap_or_default();
    let api_secret = std::env::var("BINANCE_API_SECRET").unwrap_or_default();

    if config.account_mode == AccountMode::Live && (api_key.is_empty() || api_secret.is_empty()) {
        anyhow::bail!("live mode requires BINANCE_API_KEY and BINANCE_API_SECRET");
    }

    let client = Arc::new(BinanceClient::new(api_key, api_secret));

    if config.account_mode == AccountMode::Live {
        match client.get_balance("USDT").await {
            Ok(free) => info!(asset = "USDT", free, "venue session established"),
            Err(e) => warn!(error = %e, "could not fetch balance at startup — continuing"),
        }
    }

    // ── 3. Execution engine ──────────────────────────────────────────────
    let execution = ExecutionEngine::new(client.clone(), config.account_mode);

    // ── 4. Polling loop until Ctrl+C ─────────────────────────────────────
    tokio::select! {
        _ = scheduler::run(client.as_ref(), &execution, &config) => {}
        _ = tokio::signal::ctrl_c() => {
            warn!("shutdown signal received — stopping gracefully");
        }
    }

    info!("Crossline shut down complete.");
    Ok(())
}
