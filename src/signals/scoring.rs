//! Confidence aggregation for one rule set

use crate::models::signal::ConditionCheck;

/// Upper bound for any aggregate confidence.
pub const MAX_CONFIDENCE: f64 = 100.0;

/// Sum of fired check weights, capped at [`MAX_CONFIDENCE`].
pub fn calculate_confidence(checks: &[ConditionCheck]) -> f64 {
    checks
        .iter()
        .filter(|c| c.fired)
        .map(|c| c.weight)
        .sum::<f64>()
        .min(MAX_CONFIDENCE)
}

/// The count gate. Independent of confidence: a single heavy check never passes it
/// when `min_conditions` is above one.
pub fn meets_minimum(fired_count: usize, min_conditions: usize) -> bool {
    fired_count >= min_conditions
}
