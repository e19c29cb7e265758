// =============================================================================
// Market data types
// =============================================================================

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLCV candle as returned by the venue's klines endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: i64,
}

impl Candle {
    pub fn new(
        open_time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        close_time: i64,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
        }
    }

    /// Close timestamp as UTC, `None` when the raw millisecond value is out
    /// of chrono's representable range.
    pub fn close_time_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.close_time).single()
    }
}
