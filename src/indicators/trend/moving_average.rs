//! Simple moving averages and their alignment

use crate::common::math;
use crate::models::indicators::MovingAverages;
use serde::{Deserialize, Serialize};

/// Calculate a simple moving average for every bar.
pub fn calculate_sma(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    math::rolling_mean(prices, period)
}

/// Calculate short/medium/long SMAs at once.
pub fn calculate_moving_averages(
    prices: &[f64],
    short: usize,
    medium: usize,
    long: usize,
) -> MovingAverages {
    MovingAverages {
        short: calculate_sma(prices, short),
        medium: calculate_sma(prices, medium),
        long: calculate_sma(prices, long),
    }
}

/// Calculate moving averages with default windows (20, 50, 200)
pub fn calculate_moving_averages_default(prices: &[f64]) -> MovingAverages {
    calculate_moving_averages(prices, 20, 50, 200)
}

/// Ordering of the three averages at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaAlignment {
    /// short > medium > long
    Ascending,
    /// short < medium < long
    Descending,
    Mixed,
}

/// Classify the averages; `None` if any of them is undefined.
pub fn ma_alignment(short: Option<f64>, medium: Option<f64>, long: Option<f64>) -> Option<MaAlignment> {
    let (s, m, l) = (short?, medium?, long?);
    let alignment = if s > m && m > l {
        MaAlignment::Ascending
    } else if s < m && m < l {
        MaAlignment::Descending
    } else {
        MaAlignment::Mixed
    };
    Some(alignment)
}
