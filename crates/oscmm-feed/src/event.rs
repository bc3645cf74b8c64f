//! Trade feed wire model.

use oscmm_core::{Price, Symbol};
use serde::Deserialize;

/// A single trade event from the realtime feed.
///
/// `time` is the minute bucket the trade belongs to, in unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TradeEvent {
    /// Instrument symbol.
    pub sym: Symbol,
    /// Bucket-aligned trade time in unix milliseconds.
    pub time: i64,
    /// Trade price.
    pub price: Price,
}

/// Initial snapshot batch delivered on subscription.
///
/// Channels other than `trade` may appear in the snapshot payload; they
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotBatch {
    /// Trade state at subscription time.
    #[serde(default)]
    pub trade: Vec<TradeEvent>,
}
