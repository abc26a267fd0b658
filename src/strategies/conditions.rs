//! The fixed named checks of the bullish and bearish rule sets.

use crate::config::StrategyParams;
use crate::indicators::trend::{ma_alignment, MaAlignment};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::SignalDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    RsiOversold,
    MacdBullish,
    BbOversold,
    HighVolume,
    GoldenCross,
    RsiOverbought,
    MacdBearish,
    BbOverbought,
    HighVolumeDown,
    DeathCross,
}

impl ConditionKind {
    pub const BULLISH: [ConditionKind; 5] = [
        ConditionKind::RsiOversold,
        ConditionKind::MacdBullish,
        ConditionKind::BbOversold,
        ConditionKind::HighVolume,
        ConditionKind::GoldenCross,
    ];

    pub const BEARISH: [ConditionKind; 5] = [
        ConditionKind::RsiOverbought,
        ConditionKind::MacdBearish,
        ConditionKind::BbOverbought,
        ConditionKind::HighVolumeDown,
        ConditionKind::DeathCross,
    ];

    /// Checks belonging to one direction, in evaluation order.
    pub fn for_direction(direction: SignalDirection) -> &'static [ConditionKind] {
        match direction {
            SignalDirection::Buy => &Self::BULLISH,
            SignalDirection::Sell => &Self::BEARISH,
            SignalDirection::None => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConditionKind::RsiOversold => "rsi_oversold",
            ConditionKind::MacdBullish => "macd_bullish",
            ConditionKind::BbOversold => "bb_oversold",
            ConditionKind::HighVolume => "high_volume",
            ConditionKind::GoldenCross => "golden_cross",
            ConditionKind::RsiOverbought => "rsi_overbought",
            ConditionKind::MacdBearish => "macd_bearish",
            ConditionKind::BbOverbought => "bb_overbought",
            ConditionKind::HighVolumeDown => "high_volume_down",
            ConditionKind::DeathCross => "death_cross",
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            ConditionKind::RsiOversold | ConditionKind::RsiOverbought => 25.0,
            ConditionKind::MacdBullish | ConditionKind::MacdBearish => 20.0,
            ConditionKind::BbOversold | ConditionKind::BbOverbought => 15.0,
            ConditionKind::HighVolume | ConditionKind::HighVolumeDown => 10.0,
            ConditionKind::GoldenCross | ConditionKind::DeathCross => 30.0,
        }
    }

    pub fn direction(&self) -> SignalDirection {
        if Self::BULLISH.contains(self) {
            SignalDirection::Buy
        } else {
            SignalDirection::Sell
        }
    }

    /// Whether the check fires on this bar. Undefined inputs never fire.
    pub fn check(&self, bar: &IndicatorSnapshot, params: &StrategyParams) -> bool {
        match self {
            ConditionKind::RsiOversold => lt(bar.rsi, Some(params.rsi_oversold)),
            ConditionKind::RsiOverbought => gt(bar.rsi, Some(params.rsi_overbought)),
            ConditionKind::MacdBullish => {
                gt(bar.macd, bar.macd_signal) && gt(bar.macd_histogram, Some(0.0))
            }
            ConditionKind::MacdBearish => {
                lt(bar.macd, bar.macd_signal) && lt(bar.macd_histogram, Some(0.0))
            }
            ConditionKind::BbOversold => lt(Some(bar.close), bar.bb_lower),
            ConditionKind::BbOverbought => gt(Some(bar.close), bar.bb_upper),
            ConditionKind::HighVolume => gt(bar.volume_ratio, Some(params.volume_threshold)),
            ConditionKind::HighVolumeDown => {
                gt(bar.volume_ratio, Some(params.volume_threshold)) && bar.close < bar.open
            }
            ConditionKind::GoldenCross => {
                ma_alignment(bar.sma_short, bar.sma_medium, bar.sma_long)
                    == Some(MaAlignment::Ascending)
            }
            ConditionKind::DeathCross => {
                ma_alignment(bar.sma_short, bar.sma_medium, bar.sma_long)
                    == Some(MaAlignment::Descending)
            }
        }
    }
}

fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}
