//! Minute-bucket time arithmetic.
//!
//! Candle data is keyed by fixed one-minute buckets in unix milliseconds.

use crate::error::{CoreError, Result};
use chrono::DateTime;

/// Width of one candle bucket in milliseconds.
pub const BUCKET_MS: i64 = 60_000;

/// Round `ms` up to the next minute boundary.
///
/// A value exactly on a boundary maps to the following boundary, so the
/// result is always strictly greater than the input.
#[inline]
pub fn bucket_end(ms: i64) -> i64 {
    ms + BUCKET_MS - ms.rem_euclid(BUCKET_MS)
}

/// Parse an ISO-8601 timestamp into unix milliseconds.
pub fn iso_to_unix_ms(ts: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| CoreError::InvalidTimestamp(format!("{ts}: {e}")))
}
