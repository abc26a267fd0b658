//! Loaded strategy set with update detection.

use crate::models::strategy::Strategy;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct StrategyBook {
    strategies: Vec<Strategy>,
    last_updated: Option<DateTime<Utc>>,
}

impl StrategyBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strategies(strategies: Vec<Strategy>) -> Self {
        let mut book = Self::new();
        book.replace(strategies);
        book
    }

    /// Swap in a freshly loaded set. Strategies with invalid parameters are dropped.
    ///
    /// Returns `true` when the newest `updated_at` differs from the previous load.
    pub fn replace(&mut self, strategies: Vec<Strategy>) -> bool {
        let valid: Vec<Strategy> = strategies
            .into_iter()
            .filter(|s| match s.params.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(strategy = %s.name, error = %e, "Skipping strategy {}: {}", s.name, e);
                    false
                }
            })
            .collect();

        let newest = valid.iter().map(|s| s.updated_at).max();
        let changed = newest != self.last_updated;
        if changed {
            info!(
                count = valid.len(),
                "Strategy set changed, {} valid strategies loaded",
                valid.len()
            );
        }

        self.strategies = valid;
        self.last_updated = newest;
        changed
    }

    pub fn all(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn active(&self) -> Vec<&Strategy> {
        self.strategies.iter().filter(|s| s.is_active).collect()
    }

    pub fn by_name(&self, name: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.name == name)
    }

    /// Active strategies allowed to feed automated trading.
    pub fn autotrade(&self) -> Vec<&Strategy> {
        self.strategies
            .iter()
            .filter(|s| s.is_active && s.params.for_autotrade)
            .collect()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
