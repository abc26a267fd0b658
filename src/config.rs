//! Strategy parameters and environment-driven engine configuration.

use crate::models::stats::AggregationPeriod;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("failed to parse strategy parameters: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Named numeric overrides for one strategy.
///
/// Missing keys in a JSON override take the defaults below. Call [`StrategyParams::validate`]
/// once after construction; the engine assumes validated values afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_std: f64,
    pub sma_short: usize,
    pub sma_medium: usize,
    pub sma_long: usize,
    pub volume_window: usize,
    pub volume_threshold: f64,
    /// Fired checks needed before a direction triggers.
    pub min_conditions: usize,
    /// Take-profit offset in percent of entry.
    pub tp_percent: f64,
    /// Stop-loss offset in percent of entry.
    pub sl_percent: f64,
    pub timeframe: String,
    pub for_autotrade: bool,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_std: 2.0,
            sma_short: 20,
            sma_medium: 50,
            sma_long: 200,
            volume_window: 20,
            volume_threshold: 1.5,
            min_conditions: 2,
            tp_percent: 3.0,
            sl_percent: 2.0,
            timeframe: "1h".to_string(),
            for_autotrade: false,
        }
    }
}

impl StrategyParams {
    /// Parse JSON overrides and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: StrategyParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Shortest series the indicator calculator accepts with these parameters.
    pub fn required_length(&self) -> usize {
        [
            self.rsi_period + 1,
            self.bb_period,
            self.sma_short,
            self.sma_medium,
            self.sma_long,
            self.volume_window,
            self.macd_slow,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bb_period", self.bb_period),
            ("sma_short", self.sma_short),
            ("sma_medium", self.sma_medium),
            ("sma_long", self.sma_long),
            ("volume_window", self.volume_window),
            ("min_conditions", self.min_conditions),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(invalid(name, "must be greater than 0"));
            }
        }

        if self.macd_fast >= self.macd_slow {
            return Err(invalid(
                "macd_fast",
                format!("must be below macd_slow ({})", self.macd_slow),
            ));
        }

        if !(0.0..=100.0).contains(&self.rsi_oversold) {
            return Err(invalid("rsi_oversold", "must be within 0-100"));
        }
        if !(0.0..=100.0).contains(&self.rsi_overbought) {
            return Err(invalid("rsi_overbought", "must be within 0-100"));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(invalid("rsi_oversold", "must be below rsi_overbought"));
        }

        if !(self.bb_std.is_finite() && self.bb_std > 0.0) {
            return Err(invalid("bb_std", "must be a positive number"));
        }
        if !(self.volume_threshold.is_finite() && self.volume_threshold >= 0.0) {
            return Err(invalid("volume_threshold", "must be a non-negative number"));
        }
        if !(self.tp_percent.is_finite() && self.tp_percent >= 0.0) {
            return Err(invalid("tp_percent", "must be a non-negative number"));
        }
        if !(self.sl_percent.is_finite() && (0.0..100.0).contains(&self.sl_percent)) {
            return Err(invalid("sl_percent", "must be within 0-100 (exclusive)"));
        }

        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

pub const DEFAULT_ASSETS: [&str; 10] = [
    "BTC", "ETH", "BNB", "SOL", "XRP", "ADA", "AVAX", "DOT", "DOGE", "LINK",
];

/// Process-level settings read from the environment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub monitored_assets: Vec<String>,
    pub analysis_interval_seconds: u64,
    pub max_concurrent_tasks: usize,
    pub cache_ttl_seconds: u64,
    pub candle_limit: usize,
    pub aggregation_periods: Vec<AggregationPeriod>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            monitored_assets: DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect(),
            analysis_interval_seconds: 60,
            max_concurrent_tasks: 3,
            cache_ttl_seconds: 300,
            candle_limit: 250,
            aggregation_periods: vec![AggregationPeriod::Daily],
        }
    }
}

impl EngineConfig {
    /// Build from environment variables, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let monitored_assets = match env::var("MONITORED_ASSETS") {
            Ok(raw) => {
                let assets: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if assets.is_empty() {
                    return Err(ConfigError::InvalidEnv {
                        key: "MONITORED_ASSETS",
                        value: raw,
                    });
                }
                assets
            }
            Err(_) => defaults.monitored_assets,
        };

        let aggregation_periods = match env::var("AGGREGATION_PERIODS") {
            Ok(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| {
                    s.parse::<AggregationPeriod>()
                        .map_err(|_| ConfigError::InvalidEnv {
                            key: "AGGREGATION_PERIODS",
                            value: raw.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Err(_) => defaults.aggregation_periods,
        };

        let config = Self {
            monitored_assets,
            analysis_interval_seconds: parse_env(
                "ANALYSIS_INTERVAL",
                defaults.analysis_interval_seconds,
            )?,
            max_concurrent_tasks: parse_env("MAX_CONCURRENT_TASKS", defaults.max_concurrent_tasks)?,
            cache_ttl_seconds: parse_env("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds)?,
            candle_limit: parse_env("CANDLE_LIMIT", defaults.candle_limit)?,
            aggregation_periods,
        };

        if config.max_concurrent_tasks == 0 {
            return Err(ConfigError::InvalidEnv {
                key: "MAX_CONCURRENT_TASKS",
                value: "0".to_string(),
            });
        }

        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Deployment environment name (`production`, `sandbox`, ...).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}
