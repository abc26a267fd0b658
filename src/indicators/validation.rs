//! Series validation run before any indicator computation.

use crate::indicators::error::IndicatorError;
use crate::models::indicators::{Candle, RawCandle, Series};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Validate a raw collaborator series and convert it into a [`Series`].
///
/// Rows whose close is not finite are dropped. Any other malformed row
/// rejects the whole series. The remaining length must reach `min_len`.
pub fn validate_series(
    symbol: &str,
    interval: &str,
    raw: &[RawCandle],
    min_len: usize,
) -> Result<Series, IndicatorError> {
    if raw.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }

    let mut candles = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for (index, row) in raw.iter().enumerate() {
        let timestamp = require(row.timestamp, index, "timestamp")?;
        let open = require(row.open, index, "open")?;
        let high = require(row.high, index, "high")?;
        let low = require(row.low, index, "low")?;
        let close = require(row.close, index, "close")?;
        let volume = require(row.volume, index, "volume")?;

        if !close.is_finite() {
            dropped += 1;
            continue;
        }

        let candle = Candle::new(open, high, low, close, volume, timestamp);
        check_candle(&candle, index)?;
        check_order(candles.last().map(|c: &Candle| c.timestamp), timestamp, index)?;
        candles.push(candle);
    }

    if dropped > 0 {
        warn!(
            symbol = %symbol,
            dropped = dropped,
            "Dropped {} rows with non-finite close for {}",
            dropped,
            symbol
        );
    }

    if candles.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }

    if candles.len() < min_len {
        return Err(IndicatorError::InsufficientData {
            required: min_len,
            actual: candles.len(),
        });
    }

    Ok(Series::new(symbol, interval, candles))
}

/// Check already-typed candles: finite fields, non-negative volume, strictly increasing time.
pub fn validate_candles(candles: &[Candle]) -> Result<(), IndicatorError> {
    if candles.is_empty() {
        return Err(IndicatorError::EmptySeries);
    }

    let mut previous: Option<DateTime<Utc>> = None;
    for (index, candle) in candles.iter().enumerate() {
        if !candle.close.is_finite() {
            return Err(IndicatorError::InvalidSeries(format!(
                "non-finite close at row {}",
                index
            )));
        }
        check_candle(candle, index)?;
        check_order(previous, candle.timestamp, index)?;
        previous = Some(candle.timestamp);
    }
    Ok(())
}

fn require<T>(value: Option<T>, index: usize, field: &'static str) -> Result<T, IndicatorError> {
    value.ok_or(IndicatorError::MissingField { index, field })
}

fn check_candle(candle: &Candle, index: usize) -> Result<(), IndicatorError> {
    let fields = [
        ("open", candle.open),
        ("high", candle.high),
        ("low", candle.low),
        ("volume", candle.volume),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(IndicatorError::InvalidSeries(format!(
                "non-finite {} at row {}",
                name, index
            )));
        }
    }
    if candle.volume < 0.0 {
        return Err(IndicatorError::InvalidSeries(format!(
            "negative volume at row {}",
            index
        )));
    }
    Ok(())
}

fn check_order(
    previous: Option<DateTime<Utc>>,
    current: DateTime<Utc>,
    index: usize,
) -> Result<(), IndicatorError> {
    match previous {
        Some(prev) if current <= prev => Err(IndicatorError::InvalidSeries(format!(
            "timestamp at row {} is not after the previous row",
            index
        ))),
        _ => Ok(()),
    }
}
