use crate::common::math::{pct_change, sample_std_dev};
use crate::models::indicators::Series;

/// Standard deviation of period-over-period returns, in percent.
///
/// Undefined returns are skipped. Fewer than two usable returns gives 0.
pub fn calculate_volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = pct_change(prices).into_iter().flatten().collect();
    sample_std_dev(&returns).map(|s| s * 100.0).unwrap_or(0.0)
}

/// Return volatility of the series' closes.
pub fn compute_volatility(series: &Series) -> f64 {
    calculate_volatility(&series.closes())
}
