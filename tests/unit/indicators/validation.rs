//! Unit tests for series validation

use crate::fixtures::{candle, raw, ts};
use trading_core::indicators::{validate_candles, validate_series, IndicatorError};
use trading_core::models::RawCandle;

fn good_rows(count: usize) -> Vec<RawCandle> {
    let candles: Vec<_> = (0..count)
        .map(|i| candle(i, 100.0, 100.0 + i as f64, 10.0))
        .collect();
    raw(&candles)
}

#[test]
fn test_valid_series_passes() {
    let series = validate_series("BTC", "1h", &good_rows(5), 5).unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series.symbol, "BTC");
    assert_eq!(series.interval, "1h");
}

#[test]
fn test_empty_input_is_rejected() {
    let err = validate_series("BTC", "1h", &[], 1).unwrap_err();
    assert_eq!(err, IndicatorError::EmptySeries);
    assert_eq!(err.reason(), "empty");
}

#[test]
fn test_missing_field_is_distinct_from_empty() {
    let mut rows = good_rows(3);
    rows[1].volume = None;
    let err = validate_series("BTC", "1h", &rows, 1).unwrap_err();
    assert_eq!(
        err,
        IndicatorError::MissingField {
            index: 1,
            field: "volume"
        }
    );
    assert_eq!(err.reason(), "missing-field");
}

#[test]
fn test_non_finite_close_rows_are_dropped() {
    let mut rows = good_rows(4);
    rows[2].close = Some(f64::NAN);
    let series = validate_series("BTC", "1h", &rows, 1).unwrap();
    assert_eq!(series.len(), 3);
    assert!(series.closes().iter().all(|c| c.is_finite()));
}

#[test]
fn test_all_closes_dropped_is_empty() {
    let mut rows = good_rows(2);
    for row in &mut rows {
        row.close = Some(f64::INFINITY);
    }
    let err = validate_series("BTC", "1h", &rows, 1).unwrap_err();
    assert_eq!(err, IndicatorError::EmptySeries);
}

#[test]
fn test_negative_volume_is_rejected() {
    let mut rows = good_rows(3);
    rows[0].volume = Some(-1.0);
    let err = validate_series("BTC", "1h", &rows, 1).unwrap_err();
    assert_eq!(err.reason(), "invalid-series");
}

#[test]
fn test_non_increasing_timestamps_are_rejected() {
    let mut rows = good_rows(3);
    rows[2].timestamp = Some(ts(1));
    let err = validate_series("BTC", "1h", &rows, 1).unwrap_err();
    assert!(matches!(err, IndicatorError::InvalidSeries(_)));
}

#[test]
fn test_short_series_is_insufficient() {
    let err = validate_series("BTC", "1h", &good_rows(3), 10).unwrap_err();
    assert_eq!(
        err,
        IndicatorError::InsufficientData {
            required: 10,
            actual: 3
        }
    );
}

#[test]
fn test_validate_candles_checks_order() {
    let candles = vec![candle(2, 1.0, 1.0, 1.0), candle(1, 1.0, 1.0, 1.0)];
    assert!(validate_candles(&candles).is_err());
    assert!(validate_candles(&[]).is_err());
    assert!(validate_candles(&[candle(0, 1.0, 2.0, 0.0)]).is_ok());
}
