//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::MacdSeries;

/// Calculate MACD lines for every bar.
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// EMAs are seeded with the first value, so every bar is defined.
pub fn calculate_macd(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let fast_ema = math::ema(prices, fast_period);
    let slow_ema = math::ema(prices, slow_period);

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal_line = math::ema(&macd_line, signal_period);

    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| Some(m - s))
        .collect();

    MacdSeries {
        macd: macd_line.into_iter().map(Some).collect(),
        signal: signal_line.into_iter().map(Some).collect(),
        histogram,
    }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(prices: &[f64]) -> MacdSeries {
    calculate_macd(prices, 12, 26, 9)
}
