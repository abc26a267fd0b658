use crate::config::ConfigError;
use crate::indicators::error::IndicatorError;
use thiserror::Error;

/// Failures surfaced by the batch runtime for one instrument.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Task failed: {0}")]
    Task(String),
}

impl EngineError {
    /// Short machine-readable reason recorded for skipped instruments.
    pub fn reason(&self) -> &'static str {
        match self {
            EngineError::Indicator(e) => e.reason(),
            EngineError::Config(_) => "invalid-config",
            EngineError::MarketData(_) => "market-data",
            EngineError::Storage(_) => "storage",
            EngineError::Task(_) => "task-failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
