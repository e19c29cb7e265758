// =============================================================================
// Moving-average crossover detector with RSI filter
// =============================================================================
//
// A bullish crossover is the short MA moving from at-or-below the long MA to
// strictly above it between the previous and the current sample; bearish is
// the mirror image.  The comparison is deliberately non-strict on the prior
// sample and strict on the current one: an exact touch counts as the start
// state, so a sequence equal -> above -> below can emit at most one signal
// per strict transition, never two for the same touch.
//
// The RSI filter suppresses entries into an already-overextended move: a
// bullish crossover only becomes Buy while RSI is strictly below the
// overbought threshold, a bearish crossover only becomes Sell while RSI is
// strictly above the oversold threshold.
//
// The detector keeps no state between evaluations.  While the short MA stays
// on one side of the long MA no crossover exists, so it cannot re-fire on a
// stale cross; whether to act on a repeated fresh signal is the order
// manager's concern, not ours.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::SignalError;

/// The outcome of one evaluation cycle for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    None,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// The last two defined samples of a series, or `None` when the tail holds
/// fewer than two finite values.
fn last_two(series: &[f64]) -> Option<(f64, f64)> {
    match series {
        [.., prev, last] if prev.is_finite() && last.is_finite() => Some((*prev, *last)),
        _ => None,
    }
}

/// Detect a crossover between the short and long MA series and apply the RSI
/// filter.
///
/// All three series must be index-aligned and carry defined (finite) values
/// at their last two indices; otherwise the evaluation fails with
/// [`SignalError::InsufficientHistory`].  A typed failure, never a silent
/// `Signal::None` — "could not evaluate" and "no trading opportunity" are
/// different answers.
pub fn detect_signal(
    short_ma: &[f64],
    long_ma: &[f64],
    rsi: &[f64],
    overbought: f64,
    oversold: f64,
) -> Result<Signal, SignalError> {
    let (prev_short, last_short) =
        last_two(short_ma).ok_or(SignalError::InsufficientHistory)?;
    let (prev_long, last_long) = last_two(long_ma).ok_or(SignalError::InsufficientHistory)?;
    let (_, last_rsi) = last_two(rsi).ok_or(SignalError::InsufficientHistory)?;

    let bullish = prev_short <= prev_long && last_short > last_long;
    let bearish = prev_short >= prev_long && last_short < last_long;

    if bullish && last_rsi < overbought {
        return Ok(Signal::Buy);
    }
    if bearish && last_rsi > oversold {
        return Ok(Signal::Sell);
    }

    Ok(Signal::None)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const OVERBOUGHT: f64 = 70.0;
    const OVERSOLD: f64 = 30.0;

    /// RSI series whose last value is `v` (previous value neutral).
    fn rsi_ending(v: f64) -> Vec<f64> {
        vec![50.0, 50.0, 50.0, 50.0, v]
    }

    // ---- crossover detection ---------------------------------------------

    #[test]
    fn bullish_crossover_with_neutral_rsi_is_buy() {
        let short = [10.0, 10.0, 10.0, 9.0, 11.0];
        let long = [10.0, 10.0, 10.0, 10.0, 10.0];
        let signal = detect_signal(&short, &long, &rsi_ending(50.0), OVERBOUGHT, OVERSOLD);
        assert_eq!(signal.unwrap(), Signal::Buy);
    }

    #[test]
    fn bullish_crossover_into_overbought_is_filtered() {
        let short = [10.0, 10.0, 10.0, 9.0, 11.0];
        let long = [10.0, 10.0, 10.0, 10.0, 10.0];
        let signal = detect_signal(&short, &long, &rsi_ending(75.0), OVERBOUGHT, OVERSOLD);
        assert_eq!(signal.unwrap(), Signal::None);
    }

    #[test]
    fn bearish_crossover_with_neutral_rsi_is_sell() {
        let short = [10.0, 10.0, 10.0, 11.0, 9.0];
        let long = [10.0, 10.0, 10.0, 10.0, 10.0];
        let signal = detect_signal(&short, &long, &rsi_ending(50.0), OVERBOUGHT, OVERSOLD);
        assert_eq!(signal.unwrap(), Signal::Sell);
    }

    #[test]
    fn bearish_crossover_into_oversold_is_filtered() {
        let short = [10.0, 10.0, 10.0, 11.0, 9.0];
        let long = [10.0, 10.0, 10.0, 10.0, 10.0];
        let signal = detect_signal(&short, &long, &rsi_ending(25.0), OVERBOUGHT, OVERSOLD);
        assert_eq!(signal.unwrap(), Signal::None);
    }

    #[test]
    fn no_crossover_yields_none() {
        // Short stays strictly above long the whole time: no transition.
        let short = [11.0, 11.0];
        let long = [10.0, 10.0];
        let signal = detect_signal(&short, &long, &[50.0, 50.0], OVERBOUGHT, OVERSOLD);
        assert_eq!(signal.unwrap(), Signal::None);
    }

    #[test]
    fn permanently_equal_series_yield_none() {
        // Strict inequality is never achieved, so neither side fires.
        let short = [10.0, 10.0];
        let long = [10.0, 10.0];
        for rsi in [0.0, 50.0, 100.0] {
            let signal = detect_signal(&short, &long, &[rsi, rsi], OVERBOUGHT, OVERSOLD);
            assert_eq!(signal.unwrap(), Signal::None);
        }
    }

    #[test]
    fn exact_touch_counts_as_start_state() {
        // prev_short == prev_long, then strictly above: the non-strict prior
        // comparison treats the touch as "was at-or-below", so this fires.
        let short = [10.0, 11.0];
        let long = [10.0, 10.0];
        let signal = detect_signal(&short, &long, &[50.0, 50.0], OVERBOUGHT, OVERSOLD);
        assert_eq!(signal.unwrap(), Signal::Buy);
    }

    #[test]
    fn equal_then_above_then_below_fires_once_per_transition() {
        // equal -> above: bullish fires on that step.
        let up = detect_signal(&[10.0, 11.0], &[10.0, 10.0], &[50.0, 50.0], OVERBOUGHT, OVERSOLD);
        assert_eq!(up.unwrap(), Signal::Buy);
        // above -> below: a separate strict transition, bearish.
        let down =
            detect_signal(&[11.0, 9.0], &[10.0, 10.0], &[50.0, 50.0], OVERBOUGHT, OVERSOLD);
        assert_eq!(down.unwrap(), Signal::Sell);
    }

    #[test]
    fn crossover_is_antisymmetric() {
        // Swapping the short/long roles must turn Bullish into Bearish, not
        // into None, under the same (neutral) oscillator filter.
        let a = [10.0, 10.0, 10.0, 9.0, 11.0];
        let b = [10.0, 10.0, 10.0, 10.0, 10.0];
        let rsi = rsi_ending(50.0);
        assert_eq!(
            detect_signal(&a, &b, &rsi, OVERBOUGHT, OVERSOLD).unwrap(),
            Signal::Buy
        );
        assert_eq!(
            detect_signal(&b, &a, &rsi, OVERBOUGHT, OVERSOLD).unwrap(),
            Signal::Sell
        );
    }

    #[test]
    fn threshold_boundaries_are_strict() {
        let short = [9.0, 11.0];
        let long = [10.0, 10.0];
        // RSI exactly at the overbought threshold: not strictly below => None.
        let at = detect_signal(&short, &long, &[50.0, 70.0], OVERBOUGHT, OVERSOLD);
        assert_eq!(at.unwrap(), Signal::None);
        // Just under the threshold: Buy.
        let under = detect_signal(&short, &long, &[50.0, 69.999], OVERBOUGHT, OVERSOLD);
        assert_eq!(under.unwrap(), Signal::Buy);

        // And the mirror case for oversold.
        let short = [11.0, 9.0];
        let at = detect_signal(&short, &long, &[50.0, 30.0], OVERBOUGHT, OVERSOLD);
        assert_eq!(at.unwrap(), Signal::None);
        let above = detect_signal(&short, &long, &[50.0, 30.001], OVERBOUGHT, OVERSOLD);
        assert_eq!(above.unwrap(), Signal::Sell);
    }

    // ---- insufficient history --------------------------------------------

    #[test]
    fn single_sample_is_insufficient_history() {
        let err = detect_signal(&[10.0], &[10.0], &[50.0], OVERBOUGHT, OVERSOLD).unwrap_err();
        assert_eq!(err, SignalError::InsufficientHistory);
    }

    #[test]
    fn empty_series_is_insufficient_history() {
        let err = detect_signal(&[], &[], &[], OVERBOUGHT, OVERSOLD).unwrap_err();
        assert_eq!(err, SignalError::InsufficientHistory);
    }

    #[test]
    fn nan_in_trailing_samples_is_insufficient_history() {
        // Two samples long, but the previous long-MA value is still in its
        // NaN warm-up prefix: not two *defined* trailing samples.
        let short = [10.0, 11.0];
        let long = [f64::NAN, 10.0];
        let err =
            detect_signal(&short, &long, &[50.0, 50.0], OVERBOUGHT, OVERSOLD).unwrap_err();
        assert_eq!(err, SignalError::InsufficientHistory);
    }

    #[test]
    fn nan_in_rsi_tail_is_insufficient_history() {
        let short = [10.0, 11.0];
        let long = [10.0, 10.0];
        let err = detect_signal(&short, &long, &[50.0, f64::NAN], OVERBOUGHT, OVERSOLD)
            .unwrap_err();
        assert_eq!(err, SignalError::InsufficientHistory);
    }
}
