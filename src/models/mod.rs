//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;
pub mod stats;
pub mod strategy;

pub use indicators::{
    BollingerSeries, Candle, IndicatorSet, IndicatorSnapshot, MacdSeries, MovingAverages,
    RawCandle, Series,
};
pub use signal::{ConditionCheck, ConditionEvaluation, ConditionResult, Signal, SignalDirection};
pub use stats::{
    AggregatedStats, AggregationPeriod, MarketSentiment, TrendDirection, TrendResult,
};
pub use strategy::Strategy;
