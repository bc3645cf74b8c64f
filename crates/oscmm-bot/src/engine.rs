//! Minute-cycle quote engine.
//!
//! Drives the whole strategy: once per wall-clock minute it gap-fills the
//! candle store, re-solves every instrument's quote, and replaces all
//! resting orders. A failed replacement is retried after a short delay;
//! once the failure counter passes the configured limit the engine halts
//! permanently. The clock is injected so tests can drive cycles by hand.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use oscmm_core::{bucket_end, InstrumentSpec, Quote, Symbol};
use oscmm_exec::{replace_orders, DynTradingApi, QuoteUpdate};
use oscmm_feed::FeedState;
use oscmm_signal::solve_quote;
use tracing::{error, info, warn};

use crate::config::SchedulerConfig;
use crate::error::{AppError, AppResult};

/// Time source for cycle scheduling.
pub trait Clock: Send + Sync {
    /// Current unix time in milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall-clock time source.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock for tests.
#[derive(Debug)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(ms: i64) -> Self {
        Self(AtomicI64::new(ms))
    }

    pub fn set(&self, ms: i64) {
        self.0.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// What the scheduler should do after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Wait for the next minute boundary.
    NextMinute,
    /// Retry after the configured delay.
    Retry,
    /// The failure limit is exceeded; never cycle again.
    Halted,
}

/// Strategy engine state.
pub struct Engine {
    feed: Arc<FeedState>,
    api: DynTradingApi,
    clock: Arc<dyn Clock>,
    instruments: Vec<InstrumentSpec>,
    scheduler: SchedulerConfig,
    /// Latest solved quote per instrument, retained across failed solves.
    quotes: HashMap<Symbol, Quote>,
    /// Monotonic order failure counter; never reset.
    failures: u32,
    halt_logged: bool,
}

impl Engine {
    pub fn new(
        feed: Arc<FeedState>,
        api: DynTradingApi,
        clock: Arc<dyn Clock>,
        instruments: Vec<InstrumentSpec>,
        scheduler: SchedulerConfig,
    ) -> Self {
        let quotes = instruments
            .iter()
            .map(|spec| (spec.symbol.clone(), Quote::unknown()))
            .collect();
        Self {
            feed,
            api,
            clock,
            instruments,
            scheduler,
            quotes,
            failures: 0,
            halt_logged: false,
        }
    }

    /// Whether the failure limit has been exceeded.
    pub fn is_halted(&self) -> bool {
        self.failures > self.scheduler.failure_limit
    }

    /// Total order failures observed so far.
    pub fn failure_count(&self) -> u32 {
        self.failures
    }

    /// Latest quote for an instrument.
    pub fn quote(&self, symbol: &Symbol) -> Quote {
        self.quotes.get(symbol).copied().unwrap_or_default()
    }

    /// Run one compute-and-replace cycle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        if self.is_halted() {
            self.note_halt();
            return CycleOutcome::Halted;
        }

        let bucket = bucket_end(self.clock.now_ms());
        self.refresh_quotes(bucket);

        if !self.feed.is_connected() {
            warn!("Feed snapshot not yet received, skipping order submission");
            return CycleOutcome::NextMinute;
        }

        let updates = self.collect_updates();
        if updates.is_empty() {
            return CycleOutcome::NextMinute;
        }

        match replace_orders(self.api.as_ref(), &updates).await {
            Ok(()) => CycleOutcome::NextMinute,
            Err(e) => {
                self.failures += 1;
                error!(
                    error = %e,
                    failures = self.failures,
                    limit = self.scheduler.failure_limit,
                    "Order replacement failed"
                );
                if self.is_halted() {
                    self.note_halt();
                    CycleOutcome::Halted
                } else {
                    CycleOutcome::Retry
                }
            }
        }
    }

    /// Run cycles until halted.
    pub async fn run(&mut self) -> AppResult<()> {
        info!(instruments = self.instruments.len(), "Engine started");
        loop {
            match self.run_cycle().await {
                CycleOutcome::Halted => return Err(AppError::Halted),
                CycleOutcome::Retry => {
                    tokio::time::sleep(Duration::from_millis(self.scheduler.retry_delay_ms)).await;
                }
                CycleOutcome::NextMinute => {
                    let now = self.clock.now_ms();
                    let wait = (bucket_end(now) - now) as u64 + self.scheduler.boundary_cushion_ms;
                    tokio::time::sleep(Duration::from_millis(wait)).await;
                }
            }
        }
    }

    /// Re-solve every instrument's quote against the candle store.
    ///
    /// Each failure is per-instrument and soft: the previous quote stays
    /// in place and the cycle carries on.
    fn refresh_quotes(&mut self, bucket: i64) {
        for spec in &self.instruments {
            if let Err(e) = self.feed.gap_fill(&spec.symbol, bucket) {
                warn!(symbol = %spec.symbol, error = %e, "Candle gap not fillable, keeping previous quote");
                continue;
            }
            let closes = self.feed.sorted_closes(&spec.symbol);
            match solve_quote(&closes, spec) {
                Ok(quote) => {
                    self.quotes.insert(spec.symbol.clone(), quote);
                }
                Err(e) => {
                    warn!(symbol = %spec.symbol, error = %e, "Quote solve failed, keeping previous quote");
                }
            }
        }
    }

    /// Instruments ready for submission: known quote and a live price.
    fn collect_updates(&self) -> Vec<QuoteUpdate> {
        let mut updates = Vec::with_capacity(self.instruments.len());
        for spec in &self.instruments {
            let quote = self.quote(&spec.symbol);
            if !quote.is_known() {
                continue;
            }
            let Some(last) = self.feed.last_price(&spec.symbol) else {
                warn!(symbol = %spec.symbol, "No live price yet, skipping instrument");
                continue;
            };
            updates.push(QuoteUpdate {
                spec: spec.clone(),
                quote,
                last,
            });
        }
        updates
    }

    fn note_halt(&mut self) {
        if !self.halt_logged {
            error!(
                failures = self.failures,
                limit = self.scheduler.failure_limit,
                "Failure limit exceeded, halting permanently"
            );
            self.halt_logged = true;
        }
    }
}
