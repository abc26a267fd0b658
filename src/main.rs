//! Runs one signal cycle and one aggregation pass over bars loaded from a JSON file.
//!
//! Usage: `trading-core <candles.json> [--watch]`
//!
//! The file maps each symbol to its raw bars. `STRATEGY_PARAMS_PATH` may point to a
//! JSON file of parameter overrides. With `--watch` the cycle repeats every
//! `ANALYSIS_INTERVAL` seconds until Ctrl-C.

use dotenvy::dotenv;
use serde_json::json;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;
use trading_core::config::{get_environment, EngineConfig, StrategyParams};
use trading_core::core::runtime::{RuntimeConfig, RuntimeContext, SignalRuntime};
use trading_core::logging;
use trading_core::metrics::Metrics;
use trading_core::models::{RawCandle, Strategy};
use trading_core::services::{
    Cache, CachedMarketDataProvider, InMemorySignalStore, StaticMarketDataProvider,
    TemplateNarrativeGenerator, TtlCache,
};
use trading_core::strategies::StrategyBook;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let path = args
        .first()
        .ok_or("usage: trading-core <candles.json> [--watch]")?;
    let watch_mode = args.iter().any(|a| a == "--watch");

    info!(environment = %get_environment(), "Starting trading-core");

    let config = EngineConfig::from_env()?;
    let candles: HashMap<String, Vec<RawCandle>> =
        serde_json::from_str(&std::fs::read_to_string(path)?)?;

    let params = match env::var("STRATEGY_PARAMS_PATH") {
        Ok(params_path) => StrategyParams::from_json(&std::fs::read_to_string(params_path)?)?,
        Err(_) => StrategyParams::default(),
    };
    params.validate()?;

    let provider = StaticMarketDataProvider::new(candles);
    let mut runtime_config = RuntimeConfig::from(&config);
    runtime_config.symbols = provider.symbols();
    runtime_config.interval = params.timeframe.clone();

    let cache: Arc<dyn Cache<Vec<RawCandle>>> =
        Arc::new(TtlCache::<Vec<RawCandle>>::new(Duration::from_secs(config.cache_ttl_seconds)));
    let store = Arc::new(InMemorySignalStore::new());
    let metrics = Arc::new(Metrics::new()?);

    let context = RuntimeContext::new(
        Arc::new(CachedMarketDataProvider::new(provider, cache)),
        store.clone(),
    )
    .with_narrator(Arc::new(TemplateNarrativeGenerator))
    .with_metrics(metrics.clone());
    let runtime = SignalRuntime::new(runtime_config, context);

    let book = StrategyBook::from_strategies(vec![Strategy::new("default", params)]);

    if watch_mode {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(true);
            }
        });
        runtime.run_periodic(&book, rx).await;
        return Ok(());
    }

    let cycle = runtime.run_book(&book).await;
    let aggregation = runtime.run_aggregation(&config.aggregation_periods).await;

    let output = json!({
        "signals": cycle.signals,
        "skipped": cycle.skipped,
        "stats": aggregation.stats,
        "aggregation_skipped": aggregation.skipped,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!(
        stored = store.signals().await.len(),
        "Run complete, metrics:\n{}",
        metrics.export()?
    );

    Ok(())
}
