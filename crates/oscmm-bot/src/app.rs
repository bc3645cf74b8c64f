//! Application wiring.
//!
//! Constructs the feed state, the trading API implementation, and the
//! engine from configuration. The realtime transport and exchange REST
//! client are external collaborators: the transport pushes events into
//! the handle returned by `feed_state`, and a `CandleHistory` source may
//! be supplied for startup backfill.

use std::sync::Arc;

use oscmm_exec::{DryRunApi, DynTradingApi};
use oscmm_feed::{backfill_from, CandleHistory, FeedState};
use tracing::{info, warn};

use crate::config::{AppConfig, OperatingMode};
use crate::engine::{Engine, SystemClock};
use crate::error::{AppError, AppResult};

/// Main application.
pub struct Application {
    config: AppConfig,
    feed: Arc<FeedState>,
    history: Option<Arc<dyn CandleHistory>>,
    engine: Engine,
}

impl Application {
    /// Create an observation-mode application with no collaborators.
    ///
    /// Trading mode needs a live exchange client and must go through
    /// `with_collaborators`.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        if config.mode == OperatingMode::Trading {
            return Err(AppError::Config(
                "Trading mode requires an exchange client, wire one via with_collaborators"
                    .to_string(),
            ));
        }
        Self::with_collaborators(config, None, Arc::new(DryRunApi))
    }

    /// Create an application with injected collaborators.
    pub fn with_collaborators(
        config: AppConfig,
        history: Option<Arc<dyn CandleHistory>>,
        api: DynTradingApi,
    ) -> AppResult<Self> {
        let instruments = config.instrument_specs()?;
        let feed = Arc::new(FeedState::new());
        let engine = Engine::new(
            Arc::clone(&feed),
            api,
            Arc::new(SystemClock),
            instruments,
            config.scheduler.clone(),
        );
        Ok(Self {
            config,
            feed,
            history,
            engine,
        })
    }

    /// Shared feed state handle for the realtime transport.
    pub fn feed_state(&self) -> Arc<FeedState> {
        Arc::clone(&self.feed)
    }

    /// Backfill candle history and run the engine until halted.
    pub async fn run(&mut self) -> AppResult<()> {
        info!(
            mode = ?self.config.mode,
            topics = ?self.config.subscription_topics(),
            "Starting quote engine"
        );

        if let Some(history) = &self.history {
            let symbols: Vec<_> = self
                .config
                .instrument_specs()?
                .into_iter()
                .map(|spec| spec.symbol)
                .collect();
            backfill_from(
                history.as_ref(),
                &self.feed,
                &symbols,
                self.config.feed.backfill_count,
            )
            .await?;
        } else {
            warn!("No candle history source, waiting for live candles");
        }

        self.engine.run().await
    }
}
