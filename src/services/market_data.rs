//! Market data provider interface and in-process implementations.

use crate::models::indicators::RawCandle;
use crate::services::cache::Cache;
use crate::services::BoxError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get up to `limit` most recent raw bars for a symbol, oldest first.
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<RawCandle>, BoxError>;
}

/// Serves bars from an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    candles: HashMap<String, Vec<RawCandle>>,
}

impl StaticMarketDataProvider {
    pub fn new(candles: HashMap<String, Vec<RawCandle>>) -> Self {
        Self { candles }
    }

    pub fn with_candles(mut self, symbol: impl Into<String>, candles: Vec<RawCandle>) -> Self {
        self.candles.insert(symbol.into(), candles);
        self
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.candles.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<RawCandle>, BoxError> {
        let candles = self
            .candles
            .get(symbol)
            .ok_or_else(|| format!("No market data for {}", symbol))?;
        let start = candles.len().saturating_sub(limit);
        Ok(candles[start..].to_vec())
    }
}

/// Wraps a provider with a shared cache keyed by symbol and limit.
pub struct CachedMarketDataProvider<P> {
    inner: P,
    cache: Arc<dyn Cache<Vec<RawCandle>>>,
}

impl<P: MarketDataProvider> CachedMarketDataProvider<P> {
    pub fn new(inner: P, cache: Arc<dyn Cache<Vec<RawCandle>>>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<P: MarketDataProvider> MarketDataProvider for CachedMarketDataProvider<P> {
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<RawCandle>, BoxError> {
        let key = format!("{}:{}", symbol, limit);
        if let Some(hit) = self.cache.get(&key) {
            debug!(symbol = %symbol, "Cache hit for {}", symbol);
            return Ok(hit);
        }

        let candles = self.inner.get_candles(symbol, limit).await?;
        self.cache.set(key, candles.clone());
        Ok(candles)
    }
}
