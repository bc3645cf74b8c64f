//! Full cancel/replace submission.
//!
//! Each cycle ends by wiping every resting order and placing a freshly
//! sized set against the latest quote. Any API failure aborts the whole
//! pass; the caller counts it and retries.

use oscmm_core::{InstrumentSpec, Price, Quote};
use tracing::info;

use crate::api::TradingApi;
use crate::error::ExecResult;
use crate::sizer::size_orders;

/// Per-instrument input to a replacement pass.
#[derive(Debug, Clone)]
pub struct QuoteUpdate {
    pub spec: InstrumentSpec,
    pub quote: Quote,
    pub last: Price,
}

/// Replace all resting orders with a freshly sized set.
///
/// Cancels per instrument first, then reads positions once and sizes
/// each instrument against its signed risk. Instruments absent from the
/// position map are treated as flat. Empty order sets skip placement.
pub async fn replace_orders(api: &dyn TradingApi, updates: &[QuoteUpdate]) -> ExecResult<()> {
    for update in updates {
        api.cancel_all(&update.spec.symbol).await?;
    }

    let positions = api.positions().await?;

    for update in updates {
        let risk = positions.get(&update.spec.symbol).copied().unwrap_or(0);
        let orders = size_orders(&update.spec, &update.quote, update.last, risk)?;
        if orders.is_empty() {
            continue;
        }
        let placed = orders.len();
        api.place_orders(&update.spec.symbol, orders).await?;
        info!(symbol = %update.spec.symbol, orders = placed, risk, "Replaced orders");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, MockTradingApi};
    use crate::error::ExecError;
    use oscmm_core::Symbol;
    use rust_decimal_macros::dec;

    fn update(risk_quote: (rust_decimal::Decimal, rust_decimal::Decimal)) -> QuoteUpdate {
        let spec =
            InstrumentSpec::new(Symbol::from("XBTUSD"), 500, Price::new(dec!(0.5))).unwrap();
        let mut quote = Quote::unknown();
        quote.set(Price::new(risk_quote.0), Price::new(risk_quote.1));
        QuoteUpdate {
            spec,
            quote,
            last: Price::new(dec!(20001)),
        }
    }

    #[tokio::test]
    async fn test_cancel_then_place() {
        let api = MockTradingApi::new();
        let updates = vec![update((dec!(19990.0), dec!(20015.5)))];

        replace_orders(&api, &updates).await.unwrap();

        let calls = api.get_calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], ApiCall::CancelAll(_)));
        assert_eq!(calls[1], ApiCall::Positions);
        assert!(matches!(calls[2], ApiCall::PlaceOrders(..)));
        assert_eq!(api.placed_orders().len(), 2);
    }

    #[tokio::test]
    async fn test_position_flows_into_sizing() {
        let api = MockTradingApi::new();
        api.set_position(Symbol::from("XBTUSD"), 300);
        let updates = vec![update((dec!(19990.0), dec!(20015.5)))];

        replace_orders(&api, &updates).await.unwrap();

        let orders = api.placed_orders();
        assert_eq!(orders[0].qty, 200);
        assert_eq!(orders[1].qty, -500);
    }

    #[tokio::test]
    async fn test_missing_position_is_flat() {
        let api = MockTradingApi::new();
        let updates = vec![update((dec!(19990.0), dec!(20015.5)))];

        replace_orders(&api, &updates).await.unwrap();

        let orders = api.placed_orders();
        assert_eq!(orders[0].qty, 500);
        assert_eq!(orders[1].qty, -500);
    }

    #[tokio::test]
    async fn test_api_failure_aborts_pass() {
        let api = MockTradingApi::new();
        api.set_fail(true);
        let updates = vec![update((dec!(19990.0), dec!(20015.5)))];

        let err = replace_orders(&api, &updates).await.unwrap_err();
        assert!(matches!(err, ExecError::Api(_)));
        assert!(api.placed_orders().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_quote_aborts_pass() {
        let api = MockTradingApi::new();
        let mut u = update((dec!(19990.0), dec!(20015.5)));
        u.quote = Quote::unknown();

        let err = replace_orders(&api, &[u]).await.unwrap_err();
        assert!(matches!(err, ExecError::QuoteUnknown(_)));
    }
}
