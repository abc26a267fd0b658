//! Unit tests for signal runtime configuration

use trading_core::config::EngineConfig;
use trading_core::core::runtime::RuntimeConfig;

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.evaluation_interval_seconds, 60);
    assert_eq!(config.max_concurrency, 3);
    assert_eq!(config.symbols.len(), 10);
    assert_eq!(config.interval, "1h");
}

#[test]
fn test_runtime_config_from_engine_config() {
    let engine = EngineConfig {
        monitored_assets: vec!["BTC".to_string(), "ETH".to_string()],
        analysis_interval_seconds: 15,
        max_concurrent_tasks: 8,
        candle_limit: 100,
        ..EngineConfig::default()
    };
    let config = RuntimeConfig::from(&engine);
    assert_eq!(config.symbols, vec!["BTC", "ETH"]);
    assert_eq!(config.evaluation_interval_seconds, 15);
    assert_eq!(config.max_concurrency, 8);
    assert_eq!(config.candle_limit, 100);
}
