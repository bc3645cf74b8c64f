//! Oscillator-inversion quote solver.
//!
//! Samples the RSI a hypothetical next close would produce over a grid
//! of candidate returns, fits a spline through (oscillator, return)
//! pairs, and reads the returns that would push the oscillator to the
//! oversold and overbought thresholds. Those returns, applied to the
//! last close and rounded to the tick, are the bid and ask.

use oscmm_core::{InstrumentSpec, Price, Quote};
use tracing::debug;

use crate::error::{SignalError, SignalResult};
use crate::rsi::{hypothetical_rsi, RSI_PERIOD};
use crate::spline::CubicSpline;

/// Number of candidate returns sampled across the span.
pub const SAMPLE_COUNT: usize = 100;

/// Half-width of the candidate return grid (fraction of last close).
pub const RETURN_SPAN: f64 = 0.02;

/// Oscillator value at which the instrument is considered oversold.
pub const OVERSOLD: f64 = 30.0;

/// Oscillator value at which the instrument is considered overbought.
pub const OVERBOUGHT: f64 = 70.0;

/// Solve for the bid/ask quote implied by `closes`.
///
/// `closes` must be ordered oldest to newest and cover at least
/// `RSI_PERIOD + 1` observations once the hypothetical close is
/// appended. Any failure leaves the caller's previous quote in place.
pub fn solve_quote(closes: &[Price], spec: &InstrumentSpec) -> SignalResult<Quote> {
    // The hypothetical close contributes one observation.
    let need = RSI_PERIOD + 1;
    if closes.len() + 1 < need {
        return Err(SignalError::InsufficientHistory {
            have: closes.len(),
            need: need - 1,
        });
    }

    let series: Vec<f64> = closes.iter().map(Price::to_f64).collect();
    let last = *series.last().ok_or(SignalError::InsufficientHistory {
        have: 0,
        need: need - 1,
    })?;
    if !last.is_finite() || last <= 0.0 {
        return Err(SignalError::NonFinitePrice);
    }

    // Sample the oscillator across the candidate return grid.
    let mut pairs = Vec::with_capacity(SAMPLE_COUNT);
    for i in 0..SAMPLE_COUNT {
        let ret = -RETURN_SPAN + 2.0 * RETURN_SPAN * i as f64 / (SAMPLE_COUNT - 1) as f64;
        let rsi = hypothetical_rsi(&series, ret).ok_or(SignalError::InsufficientHistory {
            have: closes.len(),
            need: need - 1,
        })?;
        if !rsi.is_finite() {
            return Err(SignalError::DegenerateSamples);
        }
        pairs.push((rsi, ret));
    }

    // The oscillator is monotone in the return, but sort anyway so the
    // interpolation axis is well ordered before validation.
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let spline = CubicSpline::new(xs, ys)?;

    let bid_ret = spline.eval(OVERSOLD)?;
    let ask_ret = spline.eval(OVERBOUGHT)?;

    let bid = Price::from_f64(last * (1.0 + bid_ret))
        .ok_or(SignalError::NonFinitePrice)?
        .round_to_tick(spec.tick_size);
    let ask = Price::from_f64(last * (1.0 + ask_ret))
        .ok_or(SignalError::NonFinitePrice)?
        .round_to_tick(spec.tick_size);

    debug!(
        symbol = %spec.symbol,
        bid = %bid,
        ask = %ask,
        bid_ret,
        ask_ret,
        "Solved quote"
    );

    let mut quote = Quote::unknown();
    quote.set(bid, ask);
    Ok(quote)
}
