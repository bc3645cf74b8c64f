//! Error types for oscmm-exec.

use oscmm_core::Symbol;
use thiserror::Error;

/// Execution error types.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The quote has never been solved for this instrument.
    #[error("No quote available for {0}")]
    QuoteUnknown(Symbol),

    /// No trade has been observed for this instrument yet.
    #[error("No last price for {0}")]
    NoLastPrice(Symbol),

    /// The exchange rejected or failed an order action.
    #[error("Order action failed: {0}")]
    Api(String),
}

/// Result type alias for execution operations.
pub type ExecResult<T> = std::result::Result<T, ExecError>;
