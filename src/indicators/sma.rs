// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// The arithmetic mean of the last `period` closes, recomputed at every index.
// The output is index-aligned with the input: entry `i` corresponds to close
// `i`, and entries before the window first fills (i < period - 1) are NaN so
// that downstream consumers can line the series up against the raw candles
// without bookkeeping offsets.
// =============================================================================

/// Compute the SMA series for the given `closes` and look-back `period`.
///
/// The result always has the same length as `closes`.  Entries at indices
/// `< period - 1` are `NaN` (window not yet full).
///
/// # Edge cases
/// - `period == 0` => all-NaN output (division by zero guard)
/// - `closes.len() < period` => all-NaN output
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; closes.len()];
    if period == 0 || closes.len() < period {
        return out;
    }

    // Rolling sum: add the newest close, drop the one that left the window.
    let mut sum = 0.0;
    for i in 0..closes.len() {
        sum += closes[i];
        if i >= period {
            sum -= closes[i - period];
        }
        if i + 1 >= period {
            out[i] = sum / period as f64;
        }
    }

    out
}
