use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One validated OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// A bar as delivered by a market-data collaborator, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandle {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl From<&Candle> for RawCandle {
    fn from(candle: &Candle) -> Self {
        Self {
            timestamp: Some(candle.timestamp),
            open: Some(candle.open),
            high: Some(candle.high),
            low: Some(candle.low),
            close: Some(candle.close),
            volume: Some(candle.volume),
        }
    }
}

/// Time-ordered bars for one instrument and one sampling interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub symbol: String,
    pub interval: String,
    pub candles: Vec<Candle>,
}

impl Series {
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
            candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.open).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

/// Trend oscillator lines: fast EMA minus slow EMA, its EMA, and their difference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovingAverages {
    pub short: Vec<Option<f64>>,
    pub medium: Vec<Option<f64>>,
    pub long: Vec<Option<f64>>,
}

/// Derived series aligned 1:1 with the source [`Series`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub symbol: String,
    pub timestamps: Vec<DateTime<Utc>>,
    pub open: Vec<f64>,
    pub close: Vec<f64>,
    pub rsi: Vec<Option<f64>>,
    pub macd: MacdSeries,
    pub bollinger: BollingerSeries,
    pub moving_averages: MovingAverages,
    pub volume_ratio: Vec<Option<f64>>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Values at one index of the series.
    pub fn snapshot_at(&self, index: usize) -> Option<IndicatorSnapshot> {
        let at = |series: &Vec<Option<f64>>| series.get(index).copied().flatten();
        Some(IndicatorSnapshot {
            timestamp: *self.timestamps.get(index)?,
            open: *self.open.get(index)?,
            close: *self.close.get(index)?,
            rsi: at(&self.rsi),
            macd: at(&self.macd.macd),
            macd_signal: at(&self.macd.signal),
            macd_histogram: at(&self.macd.histogram),
            bb_upper: at(&self.bollinger.upper),
            bb_middle: at(&self.bollinger.middle),
            bb_lower: at(&self.bollinger.lower),
            sma_short: at(&self.moving_averages.short),
            sma_medium: at(&self.moving_averages.medium),
            sma_long: at(&self.moving_averages.long),
            volume_ratio: at(&self.volume_ratio),
        })
    }

    /// Values at the most recent bar.
    pub fn latest(&self) -> Option<IndicatorSnapshot> {
        self.snapshot_at(self.len().checked_sub(1)?)
    }
}

/// Indicator values for a single bar. `None` means undefined at that bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub close: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub sma_short: Option<f64>,
    pub sma_medium: Option<f64>,
    pub sma_long: Option<f64>,
    pub volume_ratio: Option<f64>,
}
