//! Instrument identification and per-instrument trading parameters.

use crate::decimal::Price;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange symbol identifier (e.g. "XBTUSD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Immutable per-instrument configuration.
///
/// One per traded instrument, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Exchange symbol.
    pub symbol: Symbol,
    /// Maximum inventory magnitude in contracts.
    pub max_risk: i64,
    /// Price tick size.
    pub tick_size: Price,
}

impl InstrumentSpec {
    /// Create a validated instrument spec.
    ///
    /// `max_risk` must be positive and `tick_size` strictly positive.
    pub fn new(symbol: Symbol, max_risk: i64, tick_size: Price) -> Result<Self> {
        if max_risk <= 0 {
            return Err(CoreError::InvalidInstrument(format!(
                "{symbol}: max_risk must be > 0, got {max_risk}"
            )));
        }
        if !tick_size.is_positive() {
            return Err(CoreError::InvalidInstrument(format!(
                "{symbol}: tick_size must be > 0, got {tick_size}"
            )));
        }
        Ok(Self {
            symbol,
            max_risk,
            tick_size,
        })
    }
}
