//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::BollingerSeries;

/// Calculate Bollinger Bands for every bar.
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * population standard deviation)
/// Lower Band = Middle - (std_dev * population standard deviation)
pub fn calculate_bollinger_bands(prices: &[f64], period: usize, std_dev: f64) -> BollingerSeries {
    let rolling = math::rolling_mean_std(prices, period);

    let mut bands = BollingerSeries {
        upper: Vec::with_capacity(prices.len()),
        middle: Vec::with_capacity(prices.len()),
        lower: Vec::with_capacity(prices.len()),
    };
    for window in rolling {
        let (upper, middle, lower) = match window {
            Some((mean, std)) => (
                Some(mean + std_dev * std),
                Some(mean),
                Some(mean - std_dev * std),
            ),
            None => (None, None, None),
        };
        bands.upper.push(upper);
        bands.middle.push(middle);
        bands.lower.push(lower);
    }
    bands
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(prices: &[f64]) -> BollingerSeries {
    calculate_bollinger_bands(prices, 20, 2.0)
}
