//! Trade feed state for the oscmm quote engine.
//!
//! Owns the in-memory market state the strategy reads each cycle:
//! - Per-instrument candle series (minute bucket → close price)
//! - Last observed trade price per instrument
//! - Connection flag (set once a full trade snapshot has been applied)
//!
//! The transport that delivers trade events is an external collaborator;
//! this crate exposes the `on_trade` / `on_snapshot` handlers it calls
//! and the `CandleHistory` trait used for startup backfill.

pub mod candles;
pub mod error;
pub mod event;
pub mod history;
pub mod parser;

pub use candles::FeedState;
pub use error::{FeedError, FeedResult};
pub use event::{SnapshotBatch, TradeEvent};
pub use history::{backfill_from, BoxFuture, CandleHistory, MockCandleHistory, OhlcCandle};
pub use parser::{parse_snapshot, parse_trade};
