//! Historical candle backfill.
//!
//! The exchange REST client is an external collaborator; `CandleHistory`
//! is the seam it plugs into. `backfill_from` runs once at startup,
//! before live events are guaranteed to have arrived — live writes for
//! the same buckets simply win later.

use std::pin::Pin;

use oscmm_core::{iso_to_unix_ms, Price, Symbol};
use serde::Deserialize;
use tracing::info;

use crate::candles::FeedState;
use crate::error::{FeedError, FeedResult};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// One historical 1-minute candle as returned by the exchange.
///
/// Only the close is consumed; the timestamp is ISO-8601.
#[derive(Debug, Clone, Deserialize)]
pub struct OhlcCandle {
    pub timestamp: String,
    pub close: Price,
}

/// Source of recent historical candles.
pub trait CandleHistory: Send + Sync {
    /// Fetch up to `count` most recent 1-minute candles, newest first,
    /// including the current partial bucket.
    fn fetch_recent(&self, symbol: &Symbol, count: usize) -> BoxFuture<'_, FeedResult<Vec<OhlcCandle>>>;
}

/// Seed the candle store for every instrument from a history source.
pub async fn backfill_from(
    history: &dyn CandleHistory,
    state: &FeedState,
    symbols: &[Symbol],
    count: usize,
) -> FeedResult<()> {
    for symbol in symbols {
        let candles = history.fetch_recent(symbol, count).await?;
        let seeded = candles.len();

        let mut buckets = Vec::with_capacity(seeded);
        for candle in candles {
            buckets.push((iso_to_unix_ms(&candle.timestamp)?, candle.close));
        }
        state.backfill(symbol, buckets);

        info!(symbol = %symbol, candles = seeded, "Backfilled candle history");
    }
    Ok(())
}

/// Canned candle history for testing.
pub struct MockCandleHistory {
    candles: parking_lot::Mutex<Vec<OhlcCandle>>,
    fail: std::sync::atomic::AtomicBool,
}

impl Default for MockCandleHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCandleHistory {
    pub fn new() -> Self {
        Self {
            candles: parking_lot::Mutex::new(Vec::new()),
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Set the candles returned by the next fetch.
    pub fn set_candles(&self, candles: Vec<OhlcCandle>) {
        *self.candles.lock() = candles;
    }

    /// Make subsequent fetches fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

impl CandleHistory for MockCandleHistory {
    fn fetch_recent(&self, _symbol: &Symbol, count: usize) -> BoxFuture<'_, FeedResult<Vec<OhlcCandle>>> {
        Box::pin(async move {
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(FeedError::History("mock fetch failure".to_string()));
            }
            let candles = self.candles.lock();
            Ok(candles.iter().take(count).cloned().collect())
        })
    }
}
