//! End-to-end cycle tests: feed state in, order placements out.

use std::sync::Arc;

use oscmm_bot::{Clock, CycleOutcome, Engine, ManualClock, SchedulerConfig};
use oscmm_core::{bucket_end, InstrumentSpec, Price, Symbol, BUCKET_MS};
use oscmm_exec::{ApiCall, MockTradingApi};
use oscmm_feed::{FeedState, SnapshotBatch, TradeEvent};
use rust_decimal_macros::dec;

// 2020-01-01T00:00:30.000Z
const NOW_MS: i64 = 1_577_836_830_000;

fn sym() -> Symbol {
    Symbol::from("XBTUSD")
}

fn spec() -> InstrumentSpec {
    InstrumentSpec::new(sym(), 500, Price::new(dec!(0.5))).unwrap()
}

fn close_for(bucket: i64) -> Price {
    if (bucket / BUCKET_MS) % 2 == 0 {
        Price::new(dec!(20000))
    } else {
        Price::new(dec!(20001))
    }
}

/// Alternating 20000/20001 closes for the `count` buckets preceding the
/// current minute, ending one bucket before `bucket_end(NOW_MS)`.
fn seed_closes(feed: &FeedState, count: i64) {
    let current = bucket_end(NOW_MS);
    for k in 1..=count {
        let bucket = current - k * BUCKET_MS;
        feed.record(&sym(), bucket, close_for(bucket));
    }
}

/// Apply a snapshot whose trade matches the most recent seeded bucket,
/// setting the connected flag and the last price.
fn seed_snapshot(feed: &FeedState) {
    let bucket = bucket_end(NOW_MS) - BUCKET_MS;
    feed.on_snapshot(&SnapshotBatch {
        trade: vec![TradeEvent {
            sym: sym(),
            time: bucket,
            price: close_for(bucket),
        }],
    });
}

fn engine_with(feed: Arc<FeedState>, api: Arc<MockTradingApi>) -> Engine {
    Engine::new(
        feed,
        api,
        Arc::new(ManualClock::new(NOW_MS)),
        vec![spec()],
        SchedulerConfig::default(),
    )
}

#[tokio::test]
async fn test_cycle_places_bracketing_orders() {
    let feed = Arc::new(FeedState::new());
    seed_closes(&feed, 30);
    seed_snapshot(&feed);
    let api = Arc::new(MockTradingApi::new());
    let mut engine = engine_with(Arc::clone(&feed), Arc::clone(&api));

    assert_eq!(engine.run_cycle().await, CycleOutcome::NextMinute);

    let calls = api.get_calls();
    assert!(matches!(calls[0], ApiCall::CancelAll(_)));
    assert_eq!(calls[1], ApiCall::Positions);

    let orders = api.placed_orders();
    assert_eq!(orders.len(), 2);
    let last = feed.last_price(&sym()).unwrap();
    assert!(orders[0].is_buy());
    assert!(orders[0].price < last);
    assert_eq!(orders[0].qty, 500);
    assert!(!orders[1].is_buy());
    assert!(orders[1].price > last);
    assert_eq!(orders[1].qty, -500);
}

#[tokio::test]
async fn test_position_shrinks_one_side() {
    let feed = Arc::new(FeedState::new());
    seed_closes(&feed, 30);
    seed_snapshot(&feed);
    let api = Arc::new(MockTradingApi::new());
    api.set_position(sym(), 300);
    let mut engine = engine_with(feed, Arc::clone(&api));

    engine.run_cycle().await;

    let orders = api.placed_orders();
    assert_eq!(orders[0].qty, 200);
    assert_eq!(orders[1].qty, -500);
}

#[tokio::test]
async fn test_no_submission_before_snapshot() {
    let feed = Arc::new(FeedState::new());
    seed_closes(&feed, 30);
    // No snapshot: closes exist but the connected flag is down.
    let api = Arc::new(MockTradingApi::new());
    let mut engine = engine_with(feed, Arc::clone(&api));

    assert_eq!(engine.run_cycle().await, CycleOutcome::NextMinute);
    assert!(api.get_calls().is_empty());
    // The quote is still computed while disconnected.
    assert!(engine.quote(&sym()).is_known());
}

#[tokio::test]
async fn test_flat_history_keeps_quote_unknown() {
    let feed = Arc::new(FeedState::new());
    let current = bucket_end(NOW_MS);
    for k in 1..=30 {
        feed.record(&sym(), current - k * BUCKET_MS, Price::new(dec!(20000)));
    }
    seed_snapshot(&feed);
    let api = Arc::new(MockTradingApi::new());
    let mut engine = engine_with(feed, Arc::clone(&api));

    assert_eq!(engine.run_cycle().await, CycleOutcome::NextMinute);
    assert!(!engine.quote(&sym()).is_known());
    assert!(api.placed_orders().is_empty());
}

#[tokio::test]
async fn test_cycle_gap_fills_missing_bucket() {
    let feed = Arc::new(FeedState::new());
    let current = bucket_end(NOW_MS);
    // The bucket right before the current minute is missing; everything
    // from two back is present.
    for k in 2..=30 {
        let bucket = current - k * BUCKET_MS;
        feed.record(&sym(), bucket, close_for(bucket));
    }
    let snap_bucket = current - 2 * BUCKET_MS;
    feed.on_snapshot(&SnapshotBatch {
        trade: vec![TradeEvent {
            sym: sym(),
            time: snap_bucket,
            price: close_for(snap_bucket),
        }],
    });
    assert_eq!(feed.bucket_count(&sym()), 29);

    let api = Arc::new(MockTradingApi::new());
    let mut engine = engine_with(Arc::clone(&feed), Arc::clone(&api));
    assert_eq!(engine.run_cycle().await, CycleOutcome::NextMinute);

    // The missing bucket was synthesized and orders went out.
    assert_eq!(feed.bucket_count(&sym()), 30);
    assert_eq!(api.placed_orders().len(), 2);
}

#[tokio::test]
async fn test_failures_retry_then_halt() {
    let feed = Arc::new(FeedState::new());
    seed_closes(&feed, 30);
    seed_snapshot(&feed);
    let api = Arc::new(MockTradingApi::new());
    api.set_fail(true);
    let mut engine = engine_with(feed, Arc::clone(&api));

    // Failures 1 through 5 are retried.
    for expected in 1..=5 {
        assert_eq!(engine.run_cycle().await, CycleOutcome::Retry);
        assert_eq!(engine.failure_count(), expected);
        assert!(!engine.is_halted());
    }

    // The sixth failure crosses the limit.
    assert_eq!(engine.run_cycle().await, CycleOutcome::Halted);
    assert_eq!(engine.failure_count(), 6);
    assert!(engine.is_halted());

    // Once halted, nothing touches the API again.
    api.clear_calls();
    assert_eq!(engine.run_cycle().await, CycleOutcome::Halted);
    assert_eq!(engine.run_cycle().await, CycleOutcome::Halted);
    assert!(api.get_calls().is_empty());
    assert_eq!(engine.failure_count(), 6);
}

#[tokio::test]
async fn test_recovery_before_limit_still_counts() {
    let feed = Arc::new(FeedState::new());
    seed_closes(&feed, 30);
    seed_snapshot(&feed);
    let api = Arc::new(MockTradingApi::new());
    let mut engine = engine_with(feed, Arc::clone(&api));

    api.set_fail(true);
    assert_eq!(engine.run_cycle().await, CycleOutcome::Retry);
    assert_eq!(engine.failure_count(), 1);

    // A success does not reset the counter.
    api.set_fail(false);
    assert_eq!(engine.run_cycle().await, CycleOutcome::NextMinute);
    assert_eq!(engine.failure_count(), 1);

    api.set_fail(true);
    assert_eq!(engine.run_cycle().await, CycleOutcome::Retry);
    assert_eq!(engine.failure_count(), 2);
}

#[tokio::test]
async fn test_quote_retained_across_degenerate_solve() {
    let feed = Arc::new(FeedState::new());
    seed_closes(&feed, 30);
    seed_snapshot(&feed);
    let api = Arc::new(MockTradingApi::new());
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let mut engine = Engine::new(
        Arc::clone(&feed),
        Arc::clone(&api) as Arc<dyn oscmm_exec::TradingApi>,
        Arc::clone(&clock) as Arc<dyn Clock>,
        vec![spec()],
        SchedulerConfig::default(),
    );

    engine.run_cycle().await;
    let first = engine.quote(&sym());
    assert!(first.is_known());

    // Next minute: flood the store with flat closes so the solve
    // degenerates. The previous quote must survive and keep flowing
    // into order placement.
    clock.advance(BUCKET_MS);
    let current = bucket_end(clock.now_ms());
    for k in 1..=40 {
        feed.record(&sym(), current - k * BUCKET_MS, Price::new(dec!(20000)));
    }

    api.clear_calls();
    assert_eq!(engine.run_cycle().await, CycleOutcome::NextMinute);
    assert_eq!(engine.quote(&sym()), first);
    assert_eq!(api.placed_orders().len(), 2);
}
