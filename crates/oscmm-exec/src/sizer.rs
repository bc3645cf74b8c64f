//! Inventory-aware order sizing.
//!
//! Sizes are risk-symmetric around the position: a complete fill on
//! either quoted side lands the inventory exactly at `max_risk` long or
//! short. Prices are clamped one tick away from the last trade so a
//! post-only order can never cross the book.

use oscmm_core::{InstrumentSpec, OrderIntent, Price, Quote};
use tracing::debug;

use crate::error::{ExecError, ExecResult};

/// Compute the full replacement order set for one instrument.
///
/// `risk` is the current signed position in contracts. Returns up to two
/// intents (bid first); a side whose size works out to zero is omitted.
pub fn size_orders(
    spec: &InstrumentSpec,
    quote: &Quote,
    last: Price,
    risk: i64,
) -> ExecResult<Vec<OrderIntent>> {
    let (quote_bid, quote_ask) = match (quote.bid, quote.ask) {
        (Some(b), Some(a)) => (b, a),
        _ => return Err(ExecError::QuoteUnknown(spec.symbol.clone())),
    };

    let (bid_qty, ask_qty) = if risk > 0 {
        (spec.max_risk - risk, -spec.max_risk)
    } else if risk < 0 {
        (spec.max_risk, -(spec.max_risk - risk.abs()))
    } else {
        (spec.max_risk, -spec.max_risk)
    };

    // Never quote through the last trade.
    let bid_px = quote_bid.min(last - spec.tick_size);
    let ask_px = quote_ask.max(last + spec.tick_size);

    let mut orders = Vec::with_capacity(2);
    if bid_qty != 0 {
        orders.push(OrderIntent::post_only_limit(bid_px, bid_qty));
    }
    if ask_qty != 0 {
        orders.push(OrderIntent::post_only_limit(ask_px, ask_qty));
    }

    debug!(
        symbol = %spec.symbol,
        risk,
        bid = %bid_px,
        ask = %ask_px,
        bid_qty,
        ask_qty,
        "Sized replacement orders"
    );

    Ok(orders)
}
