//! Oscillator-inversion market-making quote engine.
//!
//! Application crate: configuration, logging, the minute-cycle engine,
//! and the wiring between feed state, signal solver, and order
//! submission.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::{AppConfig, FeedConfig, InstrumentConfig, OperatingMode, SchedulerConfig};
pub use engine::{Clock, CycleOutcome, Engine, ManualClock, SystemClock};
pub use error::{AppError, AppResult};
pub use logging::init_logging;
