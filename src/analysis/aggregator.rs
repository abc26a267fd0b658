//! Period-level descriptive statistics for one instrument.

use crate::analysis::sentiment::classify_sentiment;
use crate::analysis::trend::calculate_trend;
use crate::analysis::volatility::calculate_volatility;
use crate::indicators::error::IndicatorError;
use crate::models::indicators::Series;
use crate::models::stats::{AggregatedStats, AggregationPeriod};
use chrono::Utc;
use tracing::debug;

/// Summarize `series` under `period`. Rejects an empty series.
pub fn aggregate(
    asset: &str,
    series: &Series,
    period: AggregationPeriod,
) -> Result<AggregatedStats, IndicatorError> {
    let (first, last) = match (series.candles.first(), series.candles.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(IndicatorError::EmptySeries),
    };

    let closes = series.closes();
    let volumes = series.volumes();
    let n = series.len() as f64;

    let price_high = series
        .candles
        .iter()
        .map(|c| c.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let price_low = series
        .candles
        .iter()
        .map(|c| c.low)
        .fold(f64::INFINITY, f64::min);
    let volume_total: f64 = volumes.iter().sum();

    let trend = calculate_trend(&closes);

    let stats = AggregatedStats {
        asset: asset.to_string(),
        period,
        timestamp: Utc::now(),
        data_points: series.len(),
        price_open: first.open,
        price_close: last.close,
        price_high,
        price_low,
        price_mean: closes.iter().sum::<f64>() / n,
        volume_total,
        volume_mean: volume_total / n,
        volatility: calculate_volatility(&closes),
        trend_direction: trend.direction,
        trend_strength: trend.strength,
        price_change_percent: trend.change_percent,
        market_sentiment: classify_sentiment(series),
    };

    debug!(
        asset = %asset,
        period = %period,
        volatility = stats.volatility,
        trend = ?stats.trend_direction,
        sentiment = ?stats.market_sentiment,
        "Aggregated {} {} stats over {} points",
        asset,
        period,
        stats.data_points
    );

    Ok(stats)
}
