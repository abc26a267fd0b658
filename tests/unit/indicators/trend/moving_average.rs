//! Unit tests for moving averages

use crate::fixtures::{approx, linear};
use trading_core::indicators::trend::{
    calculate_moving_averages, calculate_moving_averages_default, calculate_sma, ma_alignment,
    MaAlignment,
};

#[test]
fn test_sma_values_and_warm_up() {
    let sma = calculate_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert_eq!(sma[0], None);
    assert_eq!(sma[1], None);
    assert!(approx(sma[2].unwrap(), 2.0));
    assert!(approx(sma[4].unwrap(), 4.0));
}

#[test]
fn test_moving_averages_rising_series_are_ascending() {
    let prices = linear(10.0, 1.0, 30);
    let ma = calculate_moving_averages(&prices, 5, 10, 20);
    let i = prices.len() - 1;
    assert_eq!(
        ma_alignment(ma.short[i], ma.medium[i], ma.long[i]),
        Some(MaAlignment::Ascending)
    );
}

#[test]
fn test_alignment_needs_all_averages() {
    assert_eq!(ma_alignment(Some(3.0), Some(2.0), None), None);
    assert_eq!(
        ma_alignment(Some(1.0), Some(2.0), Some(3.0)),
        Some(MaAlignment::Descending)
    );
    assert_eq!(
        ma_alignment(Some(2.0), Some(2.0), Some(1.0)),
        Some(MaAlignment::Mixed)
    );
}

fn noisy_then_flat(tail: f64) -> Vec<f64> {
    let mut prices: Vec<f64> = (0..3000)
        .map(|i| 60_000.0 + ((i * 7919) % 997) as f64 * 4.37 + (i as f64 * 0.7).sin() * 250.0)
        .collect();
    prices.extend(std::iter::repeat(tail).take(250));
    prices
}

#[test]
fn test_flat_market_after_long_history_is_mixed() {
    let prices = noisy_then_flat(64_123.89);
    let ma = calculate_moving_averages_default(&prices);
    let i = prices.len() - 1;

    assert_eq!(ma.short[i], Some(64_123.89));
    assert_eq!(ma.medium[i], Some(64_123.89));
    assert_eq!(ma.long[i], Some(64_123.89));
    assert_eq!(
        ma_alignment(ma.short[i], ma.medium[i], ma.long[i]),
        Some(MaAlignment::Mixed)
    );
}
