// =============================================================================
// Indicator Engine
// =============================================================================
//
// Pure, side-effect-free indicator math over a closing-price series.  Every
// series produced here is index-aligned with the input candles (same length,
// NaN where the window has not filled yet), so the signal detector can compare
// the last two samples of each series without offset bookkeeping.

pub mod rsi;
pub mod sma;

use crate::error::SignalError;
use crate::market_data::Candle;

/// The three derived series one evaluation works with, all aligned to the
/// input candle series.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub short_ma: Vec<f64>,
    pub long_ma: Vec<f64>,
    pub rsi: Vec<f64>,
}

/// Compute the short SMA, long SMA, and RSI series over the closing prices of
/// `candles`.
///
/// Fails with [`SignalError::InsufficientData`] when the input is shorter
/// than `max(short_period, long_period, rsi_period) + 1` — the minimum needed
/// for every series to carry defined values at the last two indices.
pub fn compute_indicators(
    candles: &[Candle],
    short_period: usize,
    long_period: usize,
    rsi_period: usize,
) -> Result<IndicatorSet, SignalError> {
    let required = short_period.max(long_period).max(rsi_period) + 1;
    if candles.len() < required {
        return Err(SignalError::InsufficientData {
            required,
            actual: candles.len(),
        });
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    Ok(IndicatorSet {
        short_ma: sma::calculate_sma(&closes, short_period),
        long_ma: sma::calculate_sma(&closes, long_period),
        rsi: rsi::calculate_rsi(&closes, rsi_period),
    })
}
