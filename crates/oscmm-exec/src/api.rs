//! Trading API trait for order execution.
//!
//! The exchange client is an external collaborator; this trait is the
//! seam it plugs into, kept dyn-compatible so the engine can hold it as
//! a trait object and tests can substitute a mock.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use oscmm_core::{OrderIntent, Symbol};
use tracing::info;

use crate::error::{ExecError, ExecResult};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Order entry operations against the exchange.
pub trait TradingApi: Send + Sync {
    /// Cancel every resting order for `symbol`.
    fn cancel_all(&self, symbol: &Symbol) -> BoxFuture<'_, ExecResult<()>>;

    /// Fetch current signed positions in contracts, keyed by symbol.
    /// Symbols with no open position may be absent.
    fn positions(&self) -> BoxFuture<'_, ExecResult<HashMap<Symbol, i64>>>;

    /// Place a bulk order set for `symbol`.
    fn place_orders(
        &self,
        symbol: &Symbol,
        orders: Vec<OrderIntent>,
    ) -> BoxFuture<'_, ExecResult<()>>;
}

/// Arc wrapper for TradingApi trait objects.
pub type DynTradingApi = Arc<dyn TradingApi>;

/// Observation-mode implementation that logs intents without sending
/// anything. Reports a flat position for every instrument.
#[derive(Debug, Default)]
pub struct DryRunApi;

impl TradingApi for DryRunApi {
    fn cancel_all(&self, symbol: &Symbol) -> BoxFuture<'_, ExecResult<()>> {
        let symbol = symbol.clone();
        Box::pin(async move {
            info!(symbol = %symbol, "Dry run: would cancel all orders");
            Ok(())
        })
    }

    fn positions(&self) -> BoxFuture<'_, ExecResult<HashMap<Symbol, i64>>> {
        Box::pin(async move { Ok(HashMap::new()) })
    }

    fn place_orders(
        &self,
        symbol: &Symbol,
        orders: Vec<OrderIntent>,
    ) -> BoxFuture<'_, ExecResult<()>> {
        let symbol = symbol.clone();
        Box::pin(async move {
            for order in &orders {
                info!(
                    symbol = %symbol,
                    price = %order.price,
                    qty = order.qty,
                    "Dry run: would place order"
                );
            }
            Ok(())
        })
    }
}

/// Recorded order action, for mock verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    CancelAll(Symbol),
    Positions,
    PlaceOrders(Symbol, Vec<OrderIntent>),
}

/// Mock trading API for testing.
#[derive(Debug)]
pub struct MockTradingApi {
    /// Recorded calls for verification.
    calls: parking_lot::Mutex<Vec<ApiCall>>,
    /// Positions returned by the next fetch.
    positions: parking_lot::Mutex<HashMap<Symbol, i64>>,
    /// Whether order actions fail.
    fail: std::sync::atomic::AtomicBool,
}

impl Default for MockTradingApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTradingApi {
    /// Create a new mock with flat positions and no failures.
    pub fn new() -> Self {
        Self {
            calls: parking_lot::Mutex::new(Vec::new()),
            positions: parking_lot::Mutex::new(HashMap::new()),
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Set the signed position reported for `symbol`.
    pub fn set_position(&self, symbol: Symbol, risk: i64) {
        self.positions.lock().insert(symbol, risk);
    }

    /// Make subsequent order actions fail.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Get recorded calls.
    pub fn get_calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    /// Clear recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Orders recorded by `place_orders`, flattened across calls.
    pub fn placed_orders(&self) -> Vec<OrderIntent> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                ApiCall::PlaceOrders(_, orders) => Some(orders.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn failing(&self) -> bool {
        self.fail.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl TradingApi for MockTradingApi {
    fn cancel_all(&self, symbol: &Symbol) -> BoxFuture<'_, ExecResult<()>> {
        let symbol = symbol.clone();
        Box::pin(async move {
            self.calls.lock().push(ApiCall::CancelAll(symbol));
            if self.failing() {
                return Err(ExecError::Api("mock cancel failure".to_string()));
            }
            Ok(())
        })
    }

    fn positions(&self) -> BoxFuture<'_, ExecResult<HashMap<Symbol, i64>>> {
        Box::pin(async move {
            self.calls.lock().push(ApiCall::Positions);
            if self.failing() {
                return Err(ExecError::Api("mock positions failure".to_string()));
            }
            Ok(self.positions.lock().clone())
        })
    }

    fn place_orders(
        &self,
        symbol: &Symbol,
        orders: Vec<OrderIntent>,
    ) -> BoxFuture<'_, ExecResult<()>> {
        let symbol = symbol.clone();
        Box::pin(async move {
            self.calls
                .lock()
                .push(ApiCall::PlaceOrders(symbol, orders));
            if self.failing() {
                return Err(ExecError::Api("mock place failure".to_string()));
            }
            Ok(())
        })
    }
}
