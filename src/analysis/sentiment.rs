//! Heuristic market mood from three independent votes.

use crate::analysis::trend::calculate_trend;
use crate::models::indicators::Series;
use crate::models::stats::{MarketSentiment, TrendDirection, TrendResult};
use std::cmp::Ordering;

/// Shorter windows are always neutral.
pub const MIN_SENTIMENT_POINTS: usize = 10;
/// Bars counted by the candle vote.
pub const CANDLE_VOTE_BARS: usize = 5;
/// A trend must be at least this clean to vote.
pub const TREND_VOTE_STRENGTH: f64 = 50.0;

pub fn classify_sentiment(series: &Series) -> MarketSentiment {
    if series.len() < MIN_SENTIMENT_POINTS {
        return MarketSentiment::Neutral;
    }

    let price_trend = calculate_trend(&series.closes());
    let volume_trend = calculate_trend(&series.volumes());

    let score = trend_vote(&price_trend)
        + volume_vote(&volume_trend, &price_trend)
        + candle_vote(series);

    match score.cmp(&0) {
        Ordering::Greater => MarketSentiment::Bullish,
        Ordering::Less => MarketSentiment::Bearish,
        Ordering::Equal => MarketSentiment::Neutral,
    }
}

fn trend_vote(trend: &TrendResult) -> i32 {
    match trend.direction {
        TrendDirection::Up if trend.strength > TREND_VOTE_STRENGTH => 1,
        TrendDirection::Down if trend.strength > TREND_VOTE_STRENGTH => -1,
        _ => 0,
    }
}

// Rising volume confirms an up move and counts against anything else.
fn volume_vote(volume: &TrendResult, price: &TrendResult) -> i32 {
    if volume.direction != TrendDirection::Up {
        return 0;
    }
    if price.direction == TrendDirection::Up {
        1
    } else {
        -1
    }
}

fn candle_vote(series: &Series) -> i32 {
    let start = series.len().saturating_sub(CANDLE_VOTE_BARS);
    let recent = &series.candles[start..];
    let bullish = recent.iter().filter(|c| c.is_bullish()).count();
    let bearish = recent.iter().filter(|c| c.is_bearish()).count();
    match bullish.cmp(&bearish) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}
