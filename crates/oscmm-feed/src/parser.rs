//! Feed message parsing.
//!
//! Parses raw JSON payloads from the trade feed transport into typed
//! events. Callers are expected to drop (not propagate) parse failures so
//! a malformed message never destabilizes the candle store.

use crate::error::FeedResult;
use crate::event::{SnapshotBatch, TradeEvent};

/// Parse a single trade event payload.
///
/// Expected shape: `{"sym": "XBTUSD", "time": 1577836860000, "price": 20000.5}`.
pub fn parse_trade(payload: &str) -> FeedResult<TradeEvent> {
    Ok(serde_json::from_str(payload)?)
}

/// Parse a snapshot payload.
///
/// Expected shape: `{"trade": [...]}`; a missing `trade` key yields an
/// empty batch.
pub fn parse_snapshot(payload: &str) -> FeedResult<SnapshotBatch> {
    Ok(serde_json::from_str(payload)?)
}
