// =============================================================================
// Price provider seam
// =============================================================================
//
// The scheduler never talks to a concrete venue: it is generic over this
// trait, so the production Binance client and the in-memory test providers
// plug in interchangeably.  The signal core itself stays entirely free of
// I/O — this trait belongs to the polling collaborator around it.

use anyhow::Result;

use crate::market_data::Candle;

/// A source of fresh candle series, keyed by symbol and timeframe.
pub trait PriceProvider {
    /// Fetch the most recent `limit` candles for `symbol` at `interval`,
    /// ordered by time ascending.
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Candle>>> + Send;
}
