//! Turns a triggered rule set into a complete signal record.

use crate::config::StrategyParams;
use crate::models::indicators::IndicatorSet;
use crate::models::signal::{ConditionResult, Signal, SignalDirection};
use chrono::Utc;

/// Direction-aware price targets around an entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopLossTakeProfit {
    pub take_profit: f64,
    pub stop_loss: f64,
}

impl StopLossTakeProfit {
    /// Percentages are whole numbers, e.g. `3.0` for 3%.
    pub fn targets(
        entry: f64,
        direction: SignalDirection,
        tp_percent: f64,
        sl_percent: f64,
    ) -> Option<Self> {
        let tp = tp_percent / 100.0;
        let sl = sl_percent / 100.0;
        match direction {
            SignalDirection::Buy => Some(Self {
                take_profit: entry * (1.0 + tp),
                stop_loss: entry * (1.0 - sl),
            }),
            SignalDirection::Sell => Some(Self {
                take_profit: entry * (1.0 - tp),
                stop_loss: entry * (1.0 + sl),
            }),
            SignalDirection::None => None,
        }
    }
}

/// Build the signal for `direction` from the evaluator's result.
///
/// Entry is the last close of `indicators`. Returns `None` for
/// [`SignalDirection::None`] or an empty indicator set; the caller decides
/// whether `result` was triggered.
pub fn synthesize_signal(
    symbol: &str,
    indicators: &IndicatorSet,
    result: &ConditionResult,
    direction: SignalDirection,
    params: &StrategyParams,
) -> Option<Signal> {
    let entry_price = *indicators.close.last()?;
    let targets =
        StopLossTakeProfit::targets(entry_price, direction, params.tp_percent, params.sl_percent)?;

    Some(Signal {
        symbol: symbol.to_string(),
        strategy_name: None,
        action: direction,
        confidence: result.confidence,
        entry_price,
        tp_price: targets.take_profit,
        sl_price: targets.stop_loss,
        timeframe: params.timeframe.clone(),
        conditions_met: result.conditions_met(),
        for_autotrade: params.for_autotrade,
        narrative: None,
        timestamp: Utc::now(),
    })
}
