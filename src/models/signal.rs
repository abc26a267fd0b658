use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Buy,
    Sell,
    None,
}

impl SignalDirection {
    /// Position side implied by the action.
    pub fn side(&self) -> Option<&'static str> {
        match self {
            SignalDirection::Buy => Some("long"),
            SignalDirection::Sell => Some("short"),
            SignalDirection::None => None,
        }
    }
}

/// One named rule check and whether it fired on the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCheck {
    pub name: String,
    pub weight: f64,
    pub fired: bool,
}

/// Outcome of one directional rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    pub direction: SignalDirection,
    pub checks: Vec<ConditionCheck>,
    /// Sum of fired weights, capped at 100.
    pub confidence: f64,
    /// Whether the fired count reached the configured minimum.
    pub triggered: bool,
}

impl ConditionResult {
    /// Names of fired checks in evaluation order.
    pub fn conditions_met(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| c.fired)
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn fired_count(&self) -> usize {
        self.checks.iter().filter(|c| c.fired).count()
    }
}

/// Both directional results for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEvaluation {
    pub bullish: ConditionResult,
    pub bearish: ConditionResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_name: Option<String>,
    pub action: SignalDirection,
    pub confidence: f64,
    pub entry_price: f64,
    pub tp_price: f64,
    pub sl_price: f64,
    pub timeframe: String,
    pub conditions_met: Vec<String>,
    pub for_autotrade: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    pub fn side(&self) -> Option<&'static str> {
        self.action.side()
    }

    pub fn with_strategy_name(mut self, name: impl Into<String>) -> Self {
        self.strategy_name = Some(name.into());
        self
    }

    pub fn with_narrative(mut self, narrative: String) -> Self {
        self.narrative = Some(narrative);
        self
    }
}
