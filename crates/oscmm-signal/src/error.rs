//! Error types for oscmm-signal.
//!
//! Every variant here is a per-instrument soft failure: the caller keeps
//! the previous quote and logs a diagnostic.

use thiserror::Error;

/// Signal error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// Not enough closes to evaluate the oscillator.
    #[error("Insufficient candle history: have {have}, need {need}")]
    InsufficientHistory { have: usize, need: usize },

    /// Sampled oscillator values are unusable as interpolation nodes
    /// (duplicates or non-finite values, e.g. a flat price history).
    #[error("Degenerate oscillator samples, cannot interpolate")]
    DegenerateSamples,

    /// The threshold lies outside the sampled oscillator range.
    #[error("Oscillator threshold {0} outside sampled range [{1}, {2}]")]
    ThresholdOutOfRange(f64, f64, f64),

    /// An interpolated return did not convert to a finite price.
    #[error("Interpolated return produced a non-finite price")]
    NonFinitePrice,
}

/// Result type alias for signal operations.
pub type SignalResult<T> = std::result::Result<T, SignalError>;
