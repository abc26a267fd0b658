//! Evaluates the bullish and bearish rule sets against the latest indicator values.

use crate::config::StrategyParams;
use crate::models::indicators::{IndicatorSet, IndicatorSnapshot};
use crate::models::signal::{ConditionCheck, ConditionEvaluation, ConditionResult, SignalDirection};
use crate::signals::scoring::{calculate_confidence, meets_minimum};
use crate::strategies::conditions::ConditionKind;
use std::cmp::Ordering;
use tracing::debug;

pub struct StrategyEvaluator;

impl StrategyEvaluator {
    /// Evaluate both directions on the most recent bar of `indicators`.
    pub fn evaluate_conditions(
        indicators: &IndicatorSet,
        params: &StrategyParams,
    ) -> ConditionEvaluation {
        match indicators.latest() {
            Some(bar) => Self::evaluate_snapshot(&bar, params),
            None => ConditionEvaluation {
                bullish: Self::unfired(SignalDirection::Buy),
                bearish: Self::unfired(SignalDirection::Sell),
            },
        }
    }

    /// Evaluate both directions on one bar. The directions do not see each other.
    pub fn evaluate_snapshot(bar: &IndicatorSnapshot, params: &StrategyParams) -> ConditionEvaluation {
        let evaluation = ConditionEvaluation {
            bullish: Self::evaluate_direction(bar, SignalDirection::Buy, params),
            bearish: Self::evaluate_direction(bar, SignalDirection::Sell, params),
        };

        debug!(
            bullish_confidence = evaluation.bullish.confidence,
            bullish_triggered = evaluation.bullish.triggered,
            bearish_confidence = evaluation.bearish.confidence,
            bearish_triggered = evaluation.bearish.triggered,
            "Evaluated conditions"
        );

        evaluation
    }

    pub fn evaluate_direction(
        bar: &IndicatorSnapshot,
        direction: SignalDirection,
        params: &StrategyParams,
    ) -> ConditionResult {
        let checks: Vec<ConditionCheck> = ConditionKind::for_direction(direction)
            .iter()
            .map(|kind| ConditionCheck {
                name: kind.name().to_string(),
                weight: kind.weight(),
                fired: kind.check(bar, params),
            })
            .collect();

        let fired = checks.iter().filter(|c| c.fired).count();
        ConditionResult {
            direction,
            confidence: calculate_confidence(&checks),
            triggered: meets_minimum(fired, params.min_conditions),
            checks,
        }
    }

    fn unfired(direction: SignalDirection) -> ConditionResult {
        let checks = ConditionKind::for_direction(direction)
            .iter()
            .map(|kind| ConditionCheck {
                name: kind.name().to_string(),
                weight: kind.weight(),
                fired: false,
            })
            .collect();
        ConditionResult {
            direction,
            checks,
            confidence: 0.0,
            triggered: false,
        }
    }
}

/// Evaluate both rule sets on the latest bar.
pub fn evaluate_conditions(indicators: &IndicatorSet, params: &StrategyParams) -> ConditionEvaluation {
    StrategyEvaluator::evaluate_conditions(indicators, params)
}

/// Pick the side to emit: the only triggered side, or the higher-confidence one
/// when both trigger. Equal confidence emits nothing.
pub fn resolve_direction(evaluation: &ConditionEvaluation) -> Option<&ConditionResult> {
    match (evaluation.bullish.triggered, evaluation.bearish.triggered) {
        (true, false) => Some(&evaluation.bullish),
        (false, true) => Some(&evaluation.bearish),
        (false, false) => None,
        (true, true) => match evaluation
            .bullish
            .confidence
            .partial_cmp(&evaluation.bearish.confidence)
        {
            Some(Ordering::Greater) => Some(&evaluation.bullish),
            Some(Ordering::Less) => Some(&evaluation.bearish),
            _ => None,
        },
    }
}
