//! Core domain types for the oscmm quote engine.
//!
//! This crate provides the fundamental types used throughout the system:
//! - `Symbol`: Exchange instrument identifier
//! - `Price`: Precision-safe price type with tick rounding
//! - `InstrumentSpec`: Per-instrument trading parameters (risk limit, tick size)
//! - `Quote`, `OrderIntent`: Strategy output types
//! - Minute-bucket time helpers

pub mod decimal;
pub mod error;
pub mod instrument;
pub mod order;
pub mod quote;
pub mod time;

pub use decimal::Price;
pub use error::{CoreError, Result};
pub use instrument::{InstrumentSpec, Symbol};
pub use order::{ExecInst, OrderIntent, OrderType};
pub use quote::Quote;
pub use time::{bucket_end, iso_to_unix_ms, BUCKET_MS};
