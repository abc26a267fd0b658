//! Volume ratio: current volume over its rolling mean

use crate::common::math;

/// Calculate `volume / SMA(volume, window)` for every bar.
///
/// Undefined during warm-up and wherever the rolling mean is zero.
pub fn calculate_volume_ratio(volumes: &[f64], window: usize) -> Vec<Option<f64>> {
    math::rolling_mean(volumes, window)
        .into_iter()
        .zip(volumes)
        .map(|(mean, &volume)| match mean {
            Some(m) if m > 0.0 => {
                let ratio = volume / m;
                ratio.is_finite().then_some(ratio)
            }
            _ => None,
        })
        .collect()
}

/// Calculate volume ratio with default window (20)
pub fn calculate_volume_ratio_default(volumes: &[f64]) -> Vec<Option<f64>> {
    calculate_volume_ratio(volumes, 20)
}
