// =============================================================================
// Relative Strength Index (RSI) — Wilder-style exponential smoothing
// =============================================================================
//
// Step 1 — delta[i] = close[i] - close[i-1] for i >= 1 (no delta at index 0).
// Step 2 — gain = max(delta, 0), loss = max(-delta, 0).
// Step 3 — avg_gain / avg_loss are exponentially smoothed with alpha =
//          1/period, seeded from the first gain/loss pair:
//            avg[1] = x[1]
//            avg[i] = alpha * x[i] + (1 - alpha) * avg[i-1]
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// When avg_loss is zero (no down moves in the smoothed window) RSI is 100 by
// definition — the division-by-zero case, not an error.
//
// The output is index-aligned with the input: index 0 is NaN, every index
// >= 1 carries a value.  Early values are numerically present but only
// statistically settled once roughly `period` samples have been absorbed;
// consumers are expected to feed a lookback well past the warm-up.
// =============================================================================

/// Compute the RSI series for the given `closes` and smoothing `period`.
///
/// The result always has the same length as `closes`; index 0 is `NaN`.
///
/// # Edge cases
/// - `period == 0` => all-NaN output (division by zero guard)
/// - fewer than 2 closes => all-NaN output (no delta to work with)
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; closes.len()];
    if period == 0 || closes.len() < 2 {
        return out;
    }

    let alpha = 1.0 / period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        if i == 1 {
            // Seed from the first defined gain/loss pair.
            avg_gain = gain;
            avg_loss = loss;
        } else {
            avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
            avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
        }

        out[i] = if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
    }

    out
}
