//! Main signal evaluation engine: indicators, rule sets, then synthesis.

use crate::config::StrategyParams;
use crate::indicators::calculator::compute_indicators;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::validate_series;
use crate::models::indicators::{IndicatorSet, RawCandle, Series};
use crate::models::signal::{ConditionEvaluation, Signal};
use crate::models::strategy::Strategy;
use crate::signals::decision::synthesize_signal;
use crate::strategies::evaluator::{resolve_direction, StrategyEvaluator};
use tracing::{debug, info};

/// Everything one evaluation produced, for callers that want more than the signal.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub signal: Option<Signal>,
    pub indicators: IndicatorSet,
    pub evaluation: ConditionEvaluation,
}

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate a validated series. `Ok(None)` means neither side produced a signal.
    pub fn evaluate(series: &Series, params: &StrategyParams) -> Result<Option<Signal>, IndicatorError> {
        Ok(Self::evaluate_with_indicators(series, params)?.signal)
    }

    /// Evaluate and return the full indicator set and both rule results.
    pub fn evaluate_with_indicators(
        series: &Series,
        params: &StrategyParams,
    ) -> Result<EngineOutput, IndicatorError> {
        let indicators = compute_indicators(series, params)?;
        let evaluation = StrategyEvaluator::evaluate_conditions(&indicators, params);

        let signal = match resolve_direction(&evaluation) {
            Some(result) => synthesize_signal(
                &series.symbol,
                &indicators,
                result,
                result.direction,
                params,
            ),
            None => {
                debug!(
                    symbol = %series.symbol,
                    bullish = evaluation.bullish.fired_count(),
                    bearish = evaluation.bearish.fired_count(),
                    "No signal for {}",
                    series.symbol
                );
                None
            }
        };

        if let Some(ref s) = signal {
            info!(
                symbol = %s.symbol,
                action = ?s.action,
                confidence = s.confidence,
                "Generated {:?} signal for {} (confidence: {:.0})",
                s.action,
                s.symbol,
                s.confidence
            );
        }

        Ok(EngineOutput {
            signal,
            indicators,
            evaluation,
        })
    }

    /// Validate raw bars, then evaluate.
    pub fn evaluate_raw(
        symbol: &str,
        interval: &str,
        raw: &[RawCandle],
        params: &StrategyParams,
    ) -> Result<Option<Signal>, IndicatorError> {
        let series = validate_series(symbol, interval, raw, params.required_length())?;
        Self::evaluate(&series, params)
    }

    /// Evaluate with a named strategy's parameters and tag the signal with its name.
    pub fn evaluate_strategy(
        series: &Series,
        strategy: &Strategy,
    ) -> Result<Option<Signal>, IndicatorError> {
        Ok(Self::evaluate(series, &strategy.params)?
            .map(|signal| signal.with_strategy_name(strategy.name.clone())))
    }
}
