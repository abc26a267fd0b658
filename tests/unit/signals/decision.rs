//! Unit tests for take-profit/stop-loss targets and signal synthesis

use crate::fixtures::{approx, linear, series_from_closes, short_params};
use trading_core::indicators::compute_indicators;
use trading_core::models::{ConditionCheck, ConditionResult, SignalDirection};
use trading_core::signals::{calculate_confidence, synthesize_signal, StopLossTakeProfit};

#[test]
fn test_buy_targets() {
    let t = StopLossTakeProfit::targets(100.0, SignalDirection::Buy, 3.0, 2.0).unwrap();
    assert!(approx(t.take_profit, 103.0));
    assert!(approx(t.stop_loss, 98.0));
}

#[test]
fn test_sell_targets() {
    let t = StopLossTakeProfit::targets(100.0, SignalDirection::Sell, 3.0, 2.0).unwrap();
    assert!(approx(t.take_profit, 97.0));
    assert!(approx(t.stop_loss, 102.0));
}

#[test]
fn test_no_direction_has_no_targets() {
    assert!(StopLossTakeProfit::targets(100.0, SignalDirection::None, 3.0, 2.0).is_none());
}

#[test]
fn test_confidence_is_capped() {
    let checks: Vec<ConditionCheck> = (0..5)
        .map(|i| ConditionCheck {
            name: format!("c{}", i),
            weight: 30.0,
            fired: true,
        })
        .collect();
    assert_eq!(calculate_confidence(&checks), 100.0);
}

#[test]
fn test_synthesize_uses_last_close() {
    let mut closes = linear(100.0, 1.0, 29);
    closes.push(100.0);
    let series = series_from_closes("SOL", &closes);
    let params = short_params();
    let indicators = compute_indicators(&series, &params).unwrap();
    let result = ConditionResult {
        direction: SignalDirection::Buy,
        checks: vec![
            ConditionCheck {
                name: "rsi_oversold".to_string(),
                weight: 25.0,
                fired: true,
            },
            ConditionCheck {
                name: "macd_bullish".to_string(),
                weight: 20.0,
                fired: false,
            },
        ],
        confidence: 25.0,
        triggered: true,
    };

    let signal =
        synthesize_signal("SOL", &indicators, &result, SignalDirection::Buy, &params).unwrap();
    assert_eq!(signal.symbol, "SOL");
    assert_eq!(signal.action, SignalDirection::Buy);
    assert_eq!(signal.side(), Some("long"));
    assert_eq!(signal.entry_price, 100.0);
    assert!(approx(signal.tp_price, 103.0));
    assert!(approx(signal.sl_price, 98.0));
    assert_eq!(signal.confidence, 25.0);
    assert_eq!(signal.conditions_met, vec!["rsi_oversold".to_string()]);
    assert_eq!(signal.timeframe, "1h");
    assert!(signal.narrative.is_none());
}
