//! In-memory candle store and live trade state.
//!
//! All mutation is last-write-wins per `(symbol, bucket)` key, which is
//! what lets trade events interleave freely with a running signal cycle:
//! the solver always reads a point-in-time snapshot via `sorted_closes`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use oscmm_core::{Price, Symbol, BUCKET_MS};
use tracing::{debug, warn};

use crate::error::{FeedError, FeedResult};
use crate::event::{SnapshotBatch, TradeEvent};
use crate::parser;

/// Shared feed state: candle series, live prices, and the connection flag.
#[derive(Debug, Default)]
pub struct FeedState {
    /// Per-instrument close price keyed by minute bucket (ms).
    candles: DashMap<Symbol, BTreeMap<i64, Price>>,
    /// Last observed trade price per instrument.
    last_trade: DashMap<Symbol, Price>,
    /// Set once a full trade snapshot has been applied.
    connected: AtomicBool,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the close price for a bucket.
    pub fn record(&self, symbol: &Symbol, bucket_ms: i64, price: Price) {
        self.candles
            .entry(symbol.clone())
            .or_default()
            .insert(bucket_ms, price);
    }

    /// Seed historical buckets at startup.
    ///
    /// Later live events may overwrite the same keys; the store never
    /// shrinks during a run.
    pub fn backfill(&self, symbol: &Symbol, candles: impl IntoIterator<Item = (i64, Price)>) {
        let mut series = self.candles.entry(symbol.clone()).or_default();
        for (bucket_ms, price) in candles {
            series.insert(bucket_ms, price);
        }
    }

    /// Ensure the bucket before `bucket_ms` exists, synthesizing it from
    /// two buckets prior when the feed skipped a minute.
    ///
    /// This is the documented fallback for a transient feed gap: the
    /// signal for the affected cycle is slightly stale rather than the
    /// cycle failing. Only when the fallback source is also missing does
    /// this report an error.
    pub fn gap_fill(&self, symbol: &Symbol, bucket_ms: i64) -> FeedResult<()> {
        let mut series = self
            .candles
            .get_mut(symbol)
            .ok_or_else(|| FeedError::MissingHistory {
                symbol: symbol.clone(),
                bucket: bucket_ms,
            })?;

        let prev = bucket_ms - BUCKET_MS;
        if series.contains_key(&prev) {
            return Ok(());
        }

        let fallback = bucket_ms - 2 * BUCKET_MS;
        match series.get(&fallback).copied() {
            Some(price) => {
                debug!(symbol = %symbol, bucket = prev, "Gap-filling missing candle from prior bucket");
                series.insert(prev, price);
                Ok(())
            }
            None => Err(FeedError::MissingHistory {
                symbol: symbol.clone(),
                bucket: prev,
            }),
        }
    }

    /// Chronologically ordered snapshot of close prices for an instrument.
    ///
    /// The returned vector is a copy; the store may keep mutating while
    /// the caller computes on it.
    pub fn sorted_closes(&self, symbol: &Symbol) -> Vec<Price> {
        self.candles
            .get(symbol)
            .map(|series| series.values().copied().collect())
            .unwrap_or_default()
    }

    /// Number of buckets held for an instrument.
    pub fn bucket_count(&self, symbol: &Symbol) -> usize {
        self.candles.get(symbol).map(|s| s.len()).unwrap_or(0)
    }

    /// Last observed trade price for an instrument.
    pub fn last_price(&self, symbol: &Symbol) -> Option<Price> {
        self.last_trade.get(symbol).map(|p| *p)
    }

    /// Whether a full snapshot has been received.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Handle a live trade event.
    pub fn on_trade(&self, event: &TradeEvent) {
        self.apply_trade(event);
    }

    /// Handle the initial snapshot batch.
    ///
    /// Applies all snapshot trades, then sets the connection flag so the
    /// first gated order submission sees the data it implies.
    pub fn on_snapshot(&self, batch: &SnapshotBatch) {
        for event in &batch.trade {
            self.apply_trade(event);
        }
        self.connected.store(true, Ordering::Release);
    }

    /// Handle a raw trade payload, dropping malformed messages.
    pub fn on_trade_json(&self, payload: &str) {
        match parser::parse_trade(payload) {
            Ok(event) => self.on_trade(&event),
            Err(e) => warn!(error = %e, "Dropping malformed trade event"),
        }
    }

    /// Handle a raw snapshot payload, dropping malformed messages.
    pub fn on_snapshot_json(&self, payload: &str) {
        match parser::parse_snapshot(payload) {
            Ok(batch) => self.on_snapshot(&batch),
            Err(e) => warn!(error = %e, "Dropping malformed snapshot"),
        }
    }

    fn apply_trade(&self, event: &TradeEvent) {
        self.record(&event.sym, event.time, event.price);
        self.last_trade.insert(event.sym.clone(), event.price);
    }
}
