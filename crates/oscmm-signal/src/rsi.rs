//! Wilder relative strength index.
//!
//! Standard 14-period RSI with Wilder smoothing: the first average gain
//! and loss are simple means over the initial window, every later step
//! blends with weight 1/period. Returns the final value of the series,
//! which is what the quote solver inverts.

/// Lookback window of the oscillator.
pub const RSI_PERIOD: usize = 14;

/// Compute the final Wilder RSI value over `closes`.
///
/// Returns `None` when the series is shorter than `period + 1`
/// observations. The result is in `[0, 100]`; a series with neither
/// gains nor losses yields the neutral 50.
pub fn wilder_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    // Seed with a simple average over the first window.
    for w in closes[..period + 1].windows(2) {
        let change = w[1] - w[0];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    // Wilder smoothing over the remainder.
    for w in closes[period..].windows(2) {
        let change = w[1] - w[0];
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
    }

    let total = avg_gain + avg_loss;
    if total == 0.0 {
        return Some(50.0);
    }
    Some(100.0 * avg_gain / total)
}

/// RSI of `closes` extended with one hypothetical observation at
/// `last * (1 + ret)`.
///
/// Pure function of its inputs; the caller samples it over a grid of
/// candidate returns.
pub fn hypothetical_rsi(closes: &[f64], ret: f64) -> Option<f64> {
    let last = *closes.last()?;
    let mut extended = Vec::with_capacity(closes.len() + 1);
    extended.extend_from_slice(closes);
    extended.push(last * (1.0 + ret));
    wilder_rsi(&extended, RSI_PERIOD)
}
