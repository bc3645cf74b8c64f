//! Order intent types.
//!
//! The strategy emits a full cancel/replace each cycle; an `OrderIntent`
//! is one resting order in the bulk placement that follows the cancel.

use crate::decimal::Price;
use serde::{Deserialize, Serialize};

/// Order type. The strategy only ever rests limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
}

/// Execution instruction attached to every order.
///
/// `ParticipateDoNotInitiate` is the exchange's post-only flag: the order
/// may only add liquidity, never cross the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecInst {
    ParticipateDoNotInitiate,
}

/// A single resting order to be placed.
///
/// Quantity is signed: positive buys, negative sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Limit price.
    pub price: Price,
    /// Signed quantity in contracts.
    #[serde(rename = "orderQty")]
    pub qty: i64,
    /// Order type.
    #[serde(rename = "ordType")]
    pub order_type: OrderType,
    /// Execution instruction.
    #[serde(rename = "execInst")]
    pub exec_inst: ExecInst,
}

impl OrderIntent {
    /// Create a post-only limit order intent.
    pub fn post_only_limit(price: Price, qty: i64) -> Self {
        Self {
            price,
            qty,
            order_type: OrderType::Limit,
            exec_inst: ExecInst::ParticipateDoNotInitiate,
        }
    }

    /// Whether this intent buys (positive quantity).
    pub fn is_buy(&self) -> bool {
        self.qty > 0
    }
}
