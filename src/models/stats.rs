use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Sideways,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// R² of a least-squares fit, scaled to 0-100.
    pub strength: f64,
    pub change_percent: f64,
}

impl TrendResult {
    pub fn flat() -> Self {
        Self {
            direction: TrendDirection::Sideways,
            strength: 0.0,
            change_percent: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl AggregationPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationPeriod::Daily => "daily",
            AggregationPeriod::Weekly => "weekly",
            AggregationPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for AggregationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(AggregationPeriod::Daily),
            "weekly" => Ok(AggregationPeriod::Weekly),
            "monthly" => Ok(AggregationPeriod::Monthly),
            other => Err(format!("unknown aggregation period '{}'", other)),
        }
    }
}

/// Period-level summary of one instrument's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub asset: String,
    pub period: AggregationPeriod,
    pub timestamp: DateTime<Utc>,
    pub data_points: usize,
    pub price_open: f64,
    pub price_close: f64,
    pub price_high: f64,
    pub price_low: f64,
    pub price_mean: f64,
    pub volume_total: f64,
    pub volume_mean: f64,
    /// Standard deviation of period returns, in percent.
    pub volatility: f64,
    pub trend_direction: TrendDirection,
    pub trend_strength: f64,
    pub price_change_percent: f64,
    pub market_sentiment: MarketSentiment,
}
