//! End-to-end runtime cycles over in-memory market data

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use trading_core::config::StrategyParams;
use trading_core::core::runtime::{RuntimeConfig, RuntimeContext, SignalRuntime};
use trading_core::metrics::Metrics;
use trading_core::models::{
    AggregatedStats, AggregationPeriod, Candle, RawCandle, Signal, SignalDirection, Strategy,
};
use trading_core::services::{
    BoxError, InMemorySignalStore, MarketDataProvider, SignalStore, StaticMarketDataProvider,
    TemplateNarrativeGenerator,
};
use trading_core::strategies::StrategyBook;

fn ts(i: usize) -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200 + i as i64 * 3600, 0).unwrap()
}

fn bars(closes: &[f64]) -> Vec<RawCandle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let candle = Candle::new(
                open,
                open.max(close) + 0.5,
                open.min(close) - 0.5,
                close,
                1000.0,
                ts(i),
            );
            RawCandle::from(&candle)
        })
        .collect()
}

fn linear(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

fn params() -> StrategyParams {
    StrategyParams {
        sma_short: 5,
        sma_medium: 10,
        sma_long: 20,
        ..StrategyParams::default()
    }
}

fn provider() -> StaticMarketDataProvider {
    let mut broken = bars(&linear(100.0, 1.0, 40));
    broken[7].high = None;

    StaticMarketDataProvider::default()
        .with_candles("BTC", bars(&linear(100.0, 1.0, 40)))
        .with_candles("ETH", bars(&linear(130.0, -1.0, 30)))
        .with_candles("SHORT", bars(&linear(10.0, 1.0, 10)))
        .with_candles("BROKEN", broken)
}

fn runtime_config(symbols: &[&str]) -> RuntimeConfig {
    RuntimeConfig {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        max_concurrency: 2,
        ..RuntimeConfig::default()
    }
}

struct FailingStore;

#[async_trait]
impl SignalStore for FailingStore {
    async fn store_signal(&self, _signal: &Signal) -> Result<(), BoxError> {
        Err("database unavailable".into())
    }

    async fn store_stats(&self, _stats: &AggregatedStats) -> Result<(), BoxError> {
        Err("database unavailable".into())
    }
}

/// Keeps daily stats and signals, rejects every other write.
struct DailyOnlyStore {
    inner: InMemorySignalStore,
}

#[async_trait]
impl SignalStore for DailyOnlyStore {
    async fn store_signal(&self, signal: &Signal) -> Result<(), BoxError> {
        self.inner.store_signal(signal).await
    }

    async fn store_stats(&self, stats: &AggregatedStats) -> Result<(), BoxError> {
        if stats.period == AggregationPeriod::Daily {
            self.inner.store_stats(stats).await
        } else {
            Err("weekly table missing".into())
        }
    }
}

/// Panics for one symbol, serves the shared fixtures otherwise.
struct PanickingProvider {
    inner: StaticMarketDataProvider,
}

#[async_trait]
impl MarketDataProvider for PanickingProvider {
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<Vec<RawCandle>, BoxError> {
        if symbol == "CRASH" {
            panic!("feed decoder crashed");
        }
        self.inner.get_candles(symbol, limit).await
    }
}

#[tokio::test]
async fn test_cycle_isolates_instrument_failures() {
    let store = Arc::new(InMemorySignalStore::new());
    let metrics = Arc::new(Metrics::new().unwrap());
    let context = RuntimeContext::new(Arc::new(provider()), store.clone())
        .with_narrator(Arc::new(TemplateNarrativeGenerator))
        .with_metrics(metrics.clone());
    let runtime = SignalRuntime::new(
        runtime_config(&["BTC", "ETH", "SHORT", "BROKEN", "XRP"]),
        context,
    );

    let strategy = Strategy::new("default", params());
    let report = runtime.run_cycle(&strategy).await;

    let actions: Vec<(&str, SignalDirection)> = report
        .signals
        .iter()
        .map(|s| (s.symbol.as_str(), s.action))
        .collect();
    assert_eq!(
        actions,
        vec![("BTC", SignalDirection::Buy), ("ETH", SignalDirection::Sell)]
    );
    assert!(report.signals.iter().all(|s| s.narrative.is_some()));
    assert!(report
        .signals
        .iter()
        .all(|s| s.strategy_name.as_deref() == Some("default")));

    let skipped: Vec<(&str, &str)> = report
        .skipped
        .iter()
        .map(|s| (s.symbol.as_str(), s.reason.as_str()))
        .collect();
    assert_eq!(
        skipped,
        vec![
            ("BROKEN", "missing-field"),
            ("SHORT", "insufficient-data"),
            ("XRP", "market-data"),
        ]
    );

    assert_eq!(store.signals().await.len(), 2);
    assert_eq!(metrics.signal_evaluations_total.get(), 5);
    assert_eq!(metrics.signals_emitted_total.get(), 2);
    assert_eq!(metrics.instruments_skipped_total.get(), 3);
    assert_eq!(metrics.signal_evaluations_active.get(), 0);
    assert!(metrics
        .export()
        .unwrap()
        .contains("signals_emitted_total 2"));
}

#[tokio::test]
async fn test_storage_failure_is_reported() {
    let context = RuntimeContext::new(Arc::new(provider()), Arc::new(FailingStore));
    let runtime = SignalRuntime::new(runtime_config(&["BTC"]), context);

    let report = runtime.run_cycle(&Strategy::new("default", params())).await;
    assert!(report.signals.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, "storage");
}

#[tokio::test]
async fn test_invalid_strategy_skips_every_instrument() {
    let store = Arc::new(InMemorySignalStore::new());
    let context = RuntimeContext::new(Arc::new(provider()), store.clone());
    let runtime = SignalRuntime::new(runtime_config(&["BTC", "ETH"]), context);

    let bad = StrategyParams {
        rsi_oversold: 80.0,
        ..params()
    };
    let report = runtime.run_cycle(&Strategy::new("bad", bad)).await;
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped.iter().all(|s| s.reason == "invalid-config"));
    assert!(store.signals().await.is_empty());
}

#[tokio::test]
async fn test_strategy_assets_override_runtime_symbols() {
    let store = Arc::new(InMemorySignalStore::new());
    let context = RuntimeContext::new(Arc::new(provider()), store.clone());
    let runtime = SignalRuntime::new(runtime_config(&["BTC", "ETH"]), context);

    let strategy = Strategy::new("eth-only", params()).with_assets(vec!["ETH".to_string()]);
    let book = StrategyBook::from_strategies(vec![strategy]);
    let report = runtime.run_book(&book).await;
    assert_eq!(report.signals.len(), 1);
    assert_eq!(report.signals[0].symbol, "ETH");
}

#[tokio::test]
async fn test_aggregation_pass() {
    let store = Arc::new(InMemorySignalStore::new());
    let context = RuntimeContext::new(Arc::new(provider()), store.clone());
    let runtime = SignalRuntime::new(runtime_config(&["BTC", "ETH", "XRP"]), context);

    let report = runtime
        .run_aggregation(&[AggregationPeriod::Daily, AggregationPeriod::Weekly])
        .await;

    let keys: Vec<(&str, AggregationPeriod)> = report
        .stats
        .iter()
        .map(|s| (s.asset.as_str(), s.period))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("BTC", AggregationPeriod::Daily),
            ("BTC", AggregationPeriod::Weekly),
            ("ETH", AggregationPeriod::Daily),
            ("ETH", AggregationPeriod::Weekly),
        ]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].symbol, "XRP");
    assert_eq!(store.stats().await.len(), 4);
}

#[tokio::test]
async fn test_periodic_run_stops_on_shutdown() {
    let store = Arc::new(InMemorySignalStore::new());
    let context = RuntimeContext::new(Arc::new(provider()), store.clone());
    let runtime = Arc::new(SignalRuntime::new(runtime_config(&["BTC"]), context));
    let book = StrategyBook::from_strategies(vec![Strategy::new("default", params())]);

    let (tx, rx) = watch::channel(false);
    let handle = {
        let runtime = runtime.clone();
        tokio::spawn(async move { runtime.run_periodic(&book, rx).await })
    };

    // The first tick fires immediately.
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(true).unwrap();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("runtime did not stop")
        .unwrap();
    assert_eq!(store.signals().await.len(), 1);
}

#[tokio::test]
async fn test_crashed_task_is_reported_as_skipped() {
    let store = Arc::new(InMemorySignalStore::new());
    let data = PanickingProvider { inner: provider() };
    let context = RuntimeContext::new(Arc::new(data), store.clone());
    let runtime = SignalRuntime::new(runtime_config(&["BTC", "CRASH"]), context);

    let report = runtime.run_cycle(&Strategy::new("default", params())).await;
    assert_eq!(report.signals.len(), 1);
    assert_eq!(report.signals[0].symbol, "BTC");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].symbol, "CRASH");
    assert_eq!(report.skipped[0].reason, "task-failed");

    let aggregation = runtime.run_aggregation(&[AggregationPeriod::Daily]).await;
    assert_eq!(aggregation.stats.len(), 1);
    assert_eq!(aggregation.skipped[0].symbol, "CRASH");
    assert_eq!(aggregation.skipped[0].reason, "task-failed");
}

#[tokio::test]
async fn test_partial_aggregation_keeps_stored_periods() {
    let store = Arc::new(DailyOnlyStore {
        inner: InMemorySignalStore::new(),
    });
    let context = RuntimeContext::new(Arc::new(provider()), store.clone());
    let runtime = SignalRuntime::new(runtime_config(&["BTC"]), context);

    let report = runtime
        .run_aggregation(&[AggregationPeriod::Daily, AggregationPeriod::Weekly])
        .await;

    assert_eq!(report.stats.len(), 1);
    assert_eq!(report.stats[0].period, AggregationPeriod::Daily);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, "storage");
    assert_eq!(store.inner.stats().await.len(), 1);
}
