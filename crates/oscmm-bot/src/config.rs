//! Application configuration.

use crate::error::{AppError, AppResult};
use oscmm_core::{InstrumentSpec, Price, Symbol};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    /// Quotes are computed and logged, nothing is sent to the exchange.
    #[default]
    Observation,
    /// Live order entry enabled.
    Trading,
}

/// Per-instrument trading parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Exchange symbol (e.g. "XBTUSD").
    pub symbol: String,
    /// Maximum inventory magnitude in contracts.
    pub max_risk: i64,
    /// Price tick size.
    pub tick_size: Decimal,
}

impl InstrumentConfig {
    /// Validate and convert into the domain type.
    pub fn to_spec(&self) -> AppResult<InstrumentSpec> {
        InstrumentSpec::new(
            Symbol::new(self.symbol.clone()),
            self.max_risk,
            Price::new(self.tick_size),
        )
        .map_err(AppError::Core)
    }
}

fn default_instruments() -> Vec<InstrumentConfig> {
    vec![InstrumentConfig {
        symbol: "XBTUSD".to_string(),
        max_risk: 500,
        // 0.5
        tick_size: Decimal::new(5, 1),
    }]
}

/// Feed and backfill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Realtime feed endpoint URL.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Number of historical 1-minute candles fetched at startup.
    #[serde(default = "default_backfill_count")]
    pub backfill_count: usize,
}

fn default_ws_url() -> String {
    "wss://www.bitmex.com/realtime".to_string()
}

fn default_backfill_count() -> usize {
    500
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            backfill_count: default_backfill_count(),
        }
    }
}

/// Cycle scheduling and failure handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Order failures tolerated before a permanent halt.
    #[serde(default = "default_failure_limit")]
    pub failure_limit: u32,
    /// Delay before retrying a failed order replacement (ms).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Cushion past the minute boundary before a cycle fires (ms),
    /// giving the feed time to deliver the boundary trade.
    #[serde(default = "default_boundary_cushion_ms")]
    pub boundary_cushion_ms: u64,
}

fn default_failure_limit() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    5_000
}

fn default_boundary_cushion_ms() -> u64 {
    1_000
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            failure_limit: default_failure_limit(),
            retry_delay_ms: default_retry_delay_ms(),
            boundary_cushion_ms: default_boundary_cushion_ms(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Operating mode.
    #[serde(default)]
    pub mode: OperatingMode,
    /// Feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Scheduler configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Instruments to quote.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<InstrumentConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::default(),
            feed: FeedConfig::default(),
            scheduler: SchedulerConfig::default(),
            instruments: default_instruments(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("OSCMM_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Check if in observation mode.
    pub fn is_observation_mode(&self) -> bool {
        self.mode == OperatingMode::Observation
    }

    /// Validate every instrument and convert to domain specs.
    pub fn instrument_specs(&self) -> AppResult<Vec<InstrumentSpec>> {
        if self.instruments.is_empty() {
            return Err(AppError::Config("No instruments configured".to_string()));
        }
        self.instruments.iter().map(InstrumentConfig::to_spec).collect()
    }

    /// Feed subscription topics, one trade channel per instrument.
    pub fn subscription_topics(&self) -> Vec<String> {
        self.instruments
            .iter()
            .map(|i| format!("trade:{}", i.symbol))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.is_observation_mode());
        assert_eq!(config.scheduler.failure_limit, 5);
        assert_eq!(config.scheduler.retry_delay_ms, 5_000);
        assert_eq!(config.feed.backfill_count, 500);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let specs = config.instrument_specs().unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].symbol.as_str(), "XBTUSD");
        assert_eq!(specs[0].max_risk, 500);
        assert_eq!(specs[0].tick_size.inner(), dec!(0.5));
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            mode = "trading"

            [feed]
            ws_url = "wss://example.test/realtime"
            backfill_count = 200

            [scheduler]
            failure_limit = 3
            retry_delay_ms = 2000

            [[instruments]]
            symbol = "ETHUSD"
            max_risk = 100
            tick_size = "0.05"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.is_observation_mode());
        assert_eq!(config.feed.backfill_count, 200);
        assert_eq!(config.scheduler.failure_limit, 3);
        assert_eq!(config.subscription_topics(), vec!["trade:ETHUSD"]);

        let specs = config.instrument_specs().unwrap();
        assert_eq!(specs[0].tick_size.inner(), dec!(0.05));
    }

    #[test]
    fn test_invalid_instrument_rejected() {
        let toml_str = r#"
            [[instruments]]
            symbol = "XBTUSD"
            max_risk = 0
            tick_size = "0.5"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(config.instrument_specs().is_err());
    }

    #[test]
    fn test_no_instruments_rejected() {
        let config = AppConfig {
            instruments: Vec::new(),
            ..AppConfig::default()
        };
        assert!(config.instrument_specs().is_err());
    }
}
