//! Builds the full aligned [`IndicatorSet`] for a series.

use crate::config::StrategyParams;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{calculate_macd, calculate_rsi};
use crate::indicators::trend::calculate_moving_averages;
use crate::indicators::validation::validate_candles;
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::indicators::volume::calculate_volume_ratio;
use crate::models::indicators::{IndicatorSet, Series};
use tracing::debug;

/// Compute every indicator the condition evaluator reads.
///
/// Fails with [`IndicatorError::InsufficientData`] when the series is shorter than
/// the longest window in `params`, and with a validation error for malformed bars.
pub fn compute_indicators(
    series: &Series,
    params: &StrategyParams,
) -> Result<IndicatorSet, IndicatorError> {
    validate_candles(&series.candles)?;

    let required = params.required_length();
    if series.len() < required {
        return Err(IndicatorError::InsufficientData {
            required,
            actual: series.len(),
        });
    }

    let closes = series.closes();
    let volumes = series.volumes();

    let set = IndicatorSet {
        symbol: series.symbol.clone(),
        timestamps: series.candles.iter().map(|c| c.timestamp).collect(),
        open: series.opens(),
        rsi: calculate_rsi(&closes, params.rsi_period),
        macd: calculate_macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal),
        bollinger: calculate_bollinger_bands(&closes, params.bb_period, params.bb_std),
        moving_averages: calculate_moving_averages(
            &closes,
            params.sma_short,
            params.sma_medium,
            params.sma_long,
        ),
        volume_ratio: calculate_volume_ratio(&volumes, params.volume_window),
        close: closes,
    };

    debug!(
        symbol = %series.symbol,
        points = set.len(),
        "Computed indicators for {} over {} points",
        series.symbol,
        set.len()
    );

    Ok(set)
}
