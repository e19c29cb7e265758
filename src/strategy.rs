// =============================================================================
// Strategy Engine
// =============================================================================
//
// Evaluates one symbol's fresh candle series and produces a Signal.
//
// Pipeline:
//   1. Compute the short SMA, long SMA, and RSI series (Indicator Engine)
//   2. Detect a crossover on the last two samples and apply the RSI filter
//      (Signal Detector)
//
// The pipeline is a pure function of the candles it is handed: no I/O, no
// retained state, safe to run for independent symbols with no coordination.
// =============================================================================

use crate::config::RuntimeConfig;
use crate::error::SignalError;
use crate::indicators::compute_indicators;
use crate::market_data::Candle;
use crate::signals::{detect_signal, Signal};

pub struct StrategyEngine;

impl StrategyEngine {
    /// Evaluate the configured MA-crossover strategy over `candles`.
    ///
    /// Both failure kinds mean "could not evaluate this cycle" and must be
    /// handled by skipping the symbol, not by trading on a default.
    pub fn evaluate(candles: &[Candle], config: &RuntimeConfig) -> Result<Signal, SignalError> {
        let set = compute_indicators(
            candles,
            config.ma_short,
            config.ma_long,
            config.rsi_period,
        )?;

        detect_signal(
            &set.short_ma,
            &set.long_ma,
            &set.rsi,
            config.rsi_overbought,
            config.rsi_oversold,
        )
    }
}
