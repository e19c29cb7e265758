// =============================================================================
// Core error types
// =============================================================================
//
// The signal core can fail in exactly two ways, both precondition failures:
// either the raw candle series is too short to fill the requested indicator
// windows, or the indicator series are too short to compare the last two
// samples.  Callers must treat both as "skip this symbol this cycle" — never
// as an implicit no-signal.

use thiserror::Error;

/// Typed failures of the indicator / signal core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The input candle series is shorter than the longest lookback requires.
    #[error("insufficient data: need at least {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The indicator series do not carry two defined trailing samples each.
    #[error("insufficient history: need two defined trailing samples in every indicator series")]
    InsufficientHistory,
}
