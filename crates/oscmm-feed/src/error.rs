//! Error types for oscmm-feed.

use oscmm_core::Symbol;
use thiserror::Error;

/// Feed error types.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Malformed feed message: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No candle history for {symbol} around bucket {bucket}")]
    MissingHistory { symbol: Symbol, bucket: i64 },

    #[error("Candle fetch failed: {0}")]
    History(String),

    #[error(transparent)]
    Core(#[from] oscmm_core::CoreError),
}

/// Result type alias for feed operations.
pub type FeedResult<T> = std::result::Result<T, FeedError>;
