//! Unit tests for rule-set evaluation and direction resolution

use crate::fixtures::ts;
use trading_core::config::StrategyParams;
use trading_core::models::{
    ConditionCheck, ConditionEvaluation, ConditionResult, IndicatorSnapshot, SignalDirection,
};
use trading_core::strategies::{resolve_direction, StrategyEvaluator};

fn oversold_bar() -> IndicatorSnapshot {
    IndicatorSnapshot {
        timestamp: ts(0),
        open: 100.0,
        close: 94.0,
        rsi: Some(20.0),
        macd: Some(-1.0),
        macd_signal: Some(-0.5),
        macd_histogram: Some(-0.5),
        bb_upper: Some(110.0),
        bb_middle: Some(102.0),
        bb_lower: Some(95.0),
        sma_short: Some(96.0),
        sma_medium: Some(100.0),
        sma_long: Some(104.0),
        volume_ratio: Some(1.0),
    }
}

fn result(direction: SignalDirection, confidence: f64, triggered: bool) -> ConditionResult {
    ConditionResult {
        direction,
        checks: vec![ConditionCheck {
            name: "x".to_string(),
            weight: confidence,
            fired: triggered,
        }],
        confidence,
        triggered,
    }
}

#[test]
fn test_directions_are_evaluated_independently() {
    let params = StrategyParams::default();
    let evaluation = StrategyEvaluator::evaluate_snapshot(&oversold_bar(), &params);

    assert_eq!(
        evaluation.bullish.conditions_met(),
        vec!["rsi_oversold", "bb_oversold"]
    );
    assert_eq!(evaluation.bullish.confidence, 40.0);
    assert!(evaluation.bullish.triggered);

    assert_eq!(
        evaluation.bearish.conditions_met(),
        vec!["macd_bearish", "death_cross"]
    );
    assert_eq!(evaluation.bearish.confidence, 50.0);
    assert!(evaluation.bearish.triggered);
}

#[test]
fn test_min_conditions_gate_ignores_weight() {
    let params = StrategyParams {
        min_conditions: 3,
        ..StrategyParams::default()
    };
    let evaluation = StrategyEvaluator::evaluate_snapshot(&oversold_bar(), &params);
    assert!(!evaluation.bullish.triggered);
    assert!(!evaluation.bearish.triggered);
    assert_eq!(evaluation.bearish.confidence, 50.0);
}

#[test]
fn test_resolution_prefers_higher_confidence() {
    let params = StrategyParams::default();
    let evaluation = StrategyEvaluator::evaluate_snapshot(&oversold_bar(), &params);
    let chosen = resolve_direction(&evaluation).unwrap();
    assert_eq!(chosen.direction, SignalDirection::Sell);
}

#[test]
fn test_resolution_tie_emits_nothing() {
    let evaluation = ConditionEvaluation {
        bullish: result(SignalDirection::Buy, 45.0, true),
        bearish: result(SignalDirection::Sell, 45.0, true),
    };
    assert!(resolve_direction(&evaluation).is_none());
}

#[test]
fn test_resolution_single_side() {
    let evaluation = ConditionEvaluation {
        bullish: result(SignalDirection::Buy, 20.0, true),
        bearish: result(SignalDirection::Sell, 80.0, false),
    };
    assert_eq!(
        resolve_direction(&evaluation).map(|r| r.direction),
        Some(SignalDirection::Buy)
    );

    let neither = ConditionEvaluation {
        bullish: result(SignalDirection::Buy, 0.0, false),
        bearish: result(SignalDirection::Sell, 0.0, false),
    };
    assert!(resolve_direction(&neither).is_none());
}

#[test]
fn test_single_heavy_check_does_not_trigger() {
    let params = StrategyParams::default();
    let mut bar = oversold_bar();
    bar.rsi = Some(50.0);
    bar.close = 100.0;
    bar.macd = Some(0.0);
    bar.macd_signal = Some(0.0);
    bar.macd_histogram = Some(0.0);

    let evaluation = StrategyEvaluator::evaluate_snapshot(&bar, &params);
    assert_eq!(evaluation.bearish.conditions_met(), vec!["death_cross"]);
    assert_eq!(evaluation.bearish.confidence, 30.0);
    assert!(!evaluation.bearish.triggered);
    assert!(resolve_direction(&evaluation).is_none());
}

#[test]
fn test_confidence_grows_with_fired_checks() {
    let params = StrategyParams::default();
    let mut bar = oversold_bar();
    let before = StrategyEvaluator::evaluate_snapshot(&bar, &params)
        .bullish
        .confidence;
    bar.volume_ratio = Some(3.0);
    let after = StrategyEvaluator::evaluate_snapshot(&bar, &params)
        .bullish
        .confidence;
    assert!(after > before);
    assert!(after <= 100.0);
}
