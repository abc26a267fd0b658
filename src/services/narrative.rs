//! Human-readable narrative collaborator.
//!
//! The engine hands over the signal plus latest-bar context and accepts an
//! optional text back. A missing narrative never blocks a signal.

use crate::models::indicators::Series;
use crate::models::signal::{Signal, SignalDirection};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub symbol: String,
    pub strategy_name: Option<String>,
    pub action: SignalDirection,
    pub confidence: f64,
    pub entry_price: f64,
    pub tp_price: f64,
    pub sl_price: f64,
    pub conditions_met: Vec<String>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub bar_time: Option<DateTime<Utc>>,
}

impl NarrativeRequest {
    pub fn from_signal(signal: &Signal, series: &Series) -> Self {
        let last = series.last();
        Self {
            symbol: signal.symbol.clone(),
            strategy_name: signal.strategy_name.clone(),
            action: signal.action,
            confidence: signal.confidence,
            entry_price: signal.entry_price,
            tp_price: signal.tp_price,
            sl_price: signal.sl_price,
            conditions_met: signal.conditions_met.clone(),
            close: last.map(|c| c.close),
            volume: last.map(|c| c.volume),
            bar_time: last.map(|c| c.timestamp),
        }
    }

    /// Prompt text for a text-generation backend.
    pub fn prompt(&self) -> String {
        let context = match (self.close, self.volume, self.bar_time) {
            (Some(close), Some(volume), Some(time)) => format!(
                "Current price: {}\nVolume: {}\nTime: {}",
                close,
                volume,
                time.to_rfc3339()
            ),
            _ => "No market context available".to_string(),
        };

        format!(
            "Analyze this trading signal and give a short rationale.\n\n\
             SIGNAL:\n\
             - Asset: {}\n\
             - Action: {:?}\n\
             - Strategy: {}\n\
             - Confidence: {}%\n\
             - Entry: {}\n\
             - Take profit: {}\n\
             - Stop loss: {}\n\n\
             CONDITIONS:\n{}\n\n\
             MARKET CONTEXT:\n{}\n\n\
             Rate the signal 1-10, list supporting factors and risks, and \
             recommend position management in 3-4 sentences.",
            self.symbol,
            self.action,
            self.strategy_name.as_deref().unwrap_or("N/A"),
            self.confidence,
            self.entry_price,
            self.tp_price,
            self.sl_price,
            self.conditions_met.join(", "),
            context
        )
    }
}

#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn narrate(&self, request: &NarrativeRequest) -> Option<String>;
}

/// Deterministic one-line summary, for runs without a text-generation backend.
pub struct TemplateNarrativeGenerator;

#[async_trait]
impl NarrativeGenerator for TemplateNarrativeGenerator {
    async fn narrate(&self, request: &NarrativeRequest) -> Option<String> {
        let side = request.action.side()?;
        Some(format!(
            "{} {} at {:.4} ({:.0}% confidence): {}. Target {:.4}, stop {:.4}.",
            request.symbol,
            side,
            request.entry_price,
            request.confidence,
            request.conditions_met.join(", "),
            request.tp_price,
            request.sl_price
        ))
    }
}
