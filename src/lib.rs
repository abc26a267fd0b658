//! Indicator and signal scoring engine.
//!
//! Raw OHLCV bars are validated into a [`Series`], turned into an aligned
//! [`IndicatorSet`], scored by weighted bullish and bearish rule sets, and
//! synthesized into a [`Signal`] with take-profit and stop-loss targets. The
//! [`analysis`] module summarizes the same series into period statistics.

pub mod analysis;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod strategies;

pub use config::{ConfigError, EngineConfig, StrategyParams};
pub use error::EngineError;
pub use indicators::{compute_indicators, validate_series, IndicatorError};
pub use models::{
    AggregatedStats, AggregationPeriod, Candle, IndicatorSet, MarketSentiment, RawCandle, Series,
    Signal, SignalDirection, Strategy, TrendDirection, TrendResult,
};
pub use signals::{synthesize_signal, SignalEngine};
pub use strategies::{evaluate_conditions, StrategyBook};
