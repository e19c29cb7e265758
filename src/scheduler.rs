// =============================================================================
// Polling scheduler
// =============================================================================
//
// One cycle: for every configured symbol, fetch a fresh candle series, run
// the strategy pipeline, and submit an order if a directional signal came
// out.  A failure for one symbol is logged and must not abort the others —
// the cycle simply moves on and the next tick retries naturally.
//
// Typed core failures (insufficient data / history) mean "could not
// evaluate": the symbol is skipped for this cycle, never traded on a
// defaulted signal.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::RuntimeConfig;
use crate::execution::ExecutionEngine;
use crate::signals::Signal;
use crate::strategy::StrategyEngine;
use crate::types::OrderSide;
use crate::venue::PriceProvider;

/// Run the polling loop until the surrounding task is dropped.
pub async fn run<P: PriceProvider>(
    provider: &P,
    execution: &ExecutionEngine,
    config: &RuntimeConfig,
) {
    info!(
        symbols = ?config.symbols,
        interval = %config.interval,
        poll_secs = config.poll_secs,
        "polling loop starting"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.poll_secs));
    loop {
        interval.tick().await;
        run_cycle(provider, execution, config).await;
    }
}

/// Evaluate every configured symbol once, isolating per-symbol failures.
pub async fn run_cycle<P: PriceProvider>(
    provider: &P,
    execution: &ExecutionEngine,
    config: &RuntimeConfig,
) {
    for symbol in &config.symbols {
        if let Err(e) = evaluate_symbol(provider, execution, config, symbol).await {
            error!(symbol = %symbol, error = %e, "symbol evaluation failed — continuing with the rest");
        }
    }
}

async fn evaluate_symbol<P: PriceProvider>(
    provider: &P,
    execution: &ExecutionEngine,
    config: &RuntimeConfig,
    symbol: &str,
) -> Result<()> {
    let candles = provider
        .fetch_candles(symbol, &config.interval, config.lookback)
        .await
        .with_context(|| format!("fetching candles for {symbol}"))?;

    let Some(last) = candles.last() else {
        warn!(symbol, "no candle data returned");
        return Ok(());
    };

    let signal = match StrategyEngine::evaluate(&candles, config) {
        Ok(signal) => signal,
        Err(e) => {
            // Precondition failure, not a trading decision: skip this cycle.
            warn!(symbol, error = %e, "skipping symbol this cycle");
            return Ok(());
        }
    };

    info!(
        symbol,
        signal = %signal,
        close = last.close,
        close_time = %last
            .close_time_utc()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        "signal evaluated"
    );

    let side = match signal {
        Signal::Buy => OrderSide::Buy,
        Signal::Sell => OrderSide::Sell,
        Signal::None => return Ok(()),
    };

    let result = execution
        .execute_signal(
            symbol,
            side,
            last.close,
            config.order_quantity,
            config.stop_loss_pct,
            config.take_profit_pct,
        )
        .await;

    info!(symbol, result = %result, "trade execution result");
    Ok(())
}
