//! Strategy quote output.

use crate::decimal::Price;
use serde::{Deserialize, Serialize};

/// Bid/ask price pair produced by the quote solver.
///
/// Both sides start unknown and stay unknown until the first successful
/// solve. A quote is only ever replaced as a whole: on solve failure the
/// previous value is retained, never partially updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Resting buy price, `None` until first computed.
    pub bid: Option<Price>,
    /// Resting sell price, `None` until first computed.
    pub ask: Option<Price>,
}

impl Quote {
    /// Quote with both sides unknown.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Overwrite both sides at once.
    pub fn set(&mut self, bid: Price, ask: Price) {
        self.bid = Some(bid);
        self.ask = Some(ask);
    }

    /// Whether both sides have been computed at least once.
    pub fn is_known(&self) -> bool {
        self.bid.is_some() && self.ask.is_some()
    }
}
