use crate::common::math::linear_fit;
use crate::models::indicators::Series;
use crate::models::stats::{TrendDirection, TrendResult};

/// Percent change beyond which a window counts as trending.
pub const TREND_THRESHOLD_PERCENT: f64 = 1.0;

/// Classify the window's direction from first-to-last change and score its
/// strength as the R² of a least-squares line, 0-100.
pub fn calculate_trend(values: &[f64]) -> TrendResult {
    if values.len() < 2 {
        return TrendResult::flat();
    }

    let first = values[0];
    let last = values[values.len() - 1];
    let change_percent = if first.is_finite() && last.is_finite() && first != 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };

    let direction = if change_percent > TREND_THRESHOLD_PERCENT {
        TrendDirection::Up
    } else if change_percent < -TREND_THRESHOLD_PERCENT {
        TrendDirection::Down
    } else {
        TrendDirection::Sideways
    };

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();
    let strength = linear_fit(&points)
        .map(|fit| (fit.r_squared.abs() * 100.0).clamp(0.0, 100.0))
        .unwrap_or(0.0);

    TrendResult {
        direction,
        strength,
        change_percent,
    }
}

/// Trend of the series' closes.
pub fn analyze_trend(series: &Series) -> TrendResult {
    calculate_trend(&series.closes())
}
