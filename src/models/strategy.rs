//! Strategy configuration records supplied by the strategy-configuration source.

use crate::config::StrategyParams;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An active (or inactive) strategy row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    #[serde(default)]
    pub params: StrategyParams,
    /// Instruments this strategy watches. Empty means the runtime default list.
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Strategy {
    pub fn new(name: impl Into<String>, params: StrategyParams) -> Self {
        Self {
            name: name.into(),
            params,
            assets: Vec::new(),
            is_active: true,
            updated_at: Utc::now(),
        }
    }

    pub fn with_assets(mut self, assets: Vec<String>) -> Self {
        self.assets = assets;
        self
    }
}
