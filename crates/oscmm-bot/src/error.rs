//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] oscmm_core::CoreError),

    #[error("Feed error: {0}")]
    Feed(#[from] oscmm_feed::FeedError),

    #[error("Execution error: {0}")]
    Exec(#[from] oscmm_exec::ExecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failure limit exceeded, trading halted")]
    Halted,
}

pub type AppResult<T> = Result<T, AppError>;
