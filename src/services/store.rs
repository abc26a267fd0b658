//! Persistence collaborator for signals and aggregated statistics.

use crate::models::signal::Signal;
use crate::models::stats::AggregatedStats;
use crate::services::BoxError;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[async_trait]
pub trait SignalStore: Send + Sync {
    async fn store_signal(&self, signal: &Signal) -> Result<(), BoxError>;
    async fn store_stats(&self, stats: &AggregatedStats) -> Result<(), BoxError>;
}

/// Keeps everything in memory. Used by the demo binary and tests.
#[derive(Default)]
pub struct InMemorySignalStore {
    signals: RwLock<Vec<Signal>>,
    stats: RwLock<Vec<AggregatedStats>>,
}

impl InMemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn signals(&self) -> Vec<Signal> {
        self.signals.read().await.clone()
    }

    pub async fn stats(&self) -> Vec<AggregatedStats> {
        self.stats.read().await.clone()
    }
}

#[async_trait]
impl SignalStore for InMemorySignalStore {
    async fn store_signal(&self, signal: &Signal) -> Result<(), BoxError> {
        self.signals.write().await.push(signal.clone());
        Ok(())
    }

    async fn store_stats(&self, stats: &AggregatedStats) -> Result<(), BoxError> {
        self.stats.write().await.push(stats.clone());
        Ok(())
    }
}
