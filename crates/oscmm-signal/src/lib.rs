//! Signal computation for the oscmm quote engine.
//!
//! Inverts a momentum oscillator to find quote prices: sample hypothetical
//! one-candle returns, evaluate the RSI each return would produce, then
//! interpolate oscillator value → return and read the returns that hit the
//! oversold/overbought thresholds. All math runs in `f64`; prices cross
//! the `Decimal` boundary only at the edges.

pub mod error;
pub mod rsi;
pub mod solver;
pub mod spline;

pub use error::{SignalError, SignalResult};
pub use rsi::{hypothetical_rsi, wilder_rsi, RSI_PERIOD};
pub use solver::{solve_quote, OVERBOUGHT, OVERSOLD, RETURN_SPAN, SAMPLE_COUNT};
pub use spline::CubicSpline;
