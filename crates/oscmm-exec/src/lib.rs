//! Order sizing and submission for the oscmm quote engine.
//!
//! Turns a solved quote plus the current signed position into a full
//! cancel/replace: cancel every resting order, then place at most one
//! post-only bid and one post-only ask sized so that a complete fill on
//! either side lands the position exactly at the risk limit.

pub mod api;
pub mod error;
pub mod sizer;
pub mod submit;

pub use api::{ApiCall, BoxFuture, DryRunApi, DynTradingApi, MockTradingApi, TradingApi};
pub use error::{ExecError, ExecResult};
pub use sizer::size_orders;
pub use submit::{replace_orders, QuoteUpdate};
