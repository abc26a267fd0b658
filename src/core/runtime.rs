//! Batch runtime fanning out per-instrument evaluation across tokio tasks.

use crate::analysis::aggregator::aggregate;
use crate::config::{EngineConfig, DEFAULT_ASSETS};
use crate::error::{EngineError, Result};
use crate::indicators::validation::validate_series;
use crate::metrics::Metrics;
use crate::models::signal::Signal;
use crate::models::stats::{AggregatedStats, AggregationPeriod};
use crate::models::strategy::Strategy;
use crate::services::market_data::MarketDataProvider;
use crate::services::narrative::{NarrativeGenerator, NarrativeRequest};
use crate::services::store::SignalStore;
use crate::signals::engine::SignalEngine;
use crate::strategies::book::StrategyBook;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Configuration for the batch runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub symbols: Vec<String>,
    pub interval: String,
    pub evaluation_interval_seconds: u64,
    pub max_concurrency: usize,
    pub candle_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect(),
            interval: "1h".to_string(),
            evaluation_interval_seconds: 60,
            max_concurrency: 3,
            candle_limit: 250,
        }
    }
}

impl From<&EngineConfig> for RuntimeConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            symbols: config.monitored_assets.clone(),
            evaluation_interval_seconds: config.analysis_interval_seconds,
            max_concurrency: config.max_concurrent_tasks,
            candle_limit: config.candle_limit,
            ..Self::default()
        }
    }
}

/// Collaborators shared by every task.
pub struct RuntimeContext {
    pub data_provider: Arc<dyn MarketDataProvider>,
    pub store: Arc<dyn SignalStore>,
    pub narrator: Option<Arc<dyn NarrativeGenerator>>,
    pub metrics: Option<Arc<Metrics>>,
}

impl RuntimeContext {
    pub fn new(data_provider: Arc<dyn MarketDataProvider>, store: Arc<dyn SignalStore>) -> Self {
        Self {
            data_provider,
            store,
            narrator: None,
            metrics: None,
        }
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedInstrument {
    pub symbol: String,
    pub reason: String,
    pub message: String,
}

impl SkippedInstrument {
    fn from_error(symbol: String, err: &EngineError) -> Self {
        Self {
            symbol,
            reason: err.reason().to_string(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one signal cycle. Sorted by symbol.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    pub signals: Vec<Signal>,
    pub skipped: Vec<SkippedInstrument>,
}

/// Outcome of one aggregation pass. Sorted by symbol.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationReport {
    pub stats: Vec<AggregatedStats>,
    pub skipped: Vec<SkippedInstrument>,
}

pub struct SignalRuntime {
    config: RuntimeConfig,
    context: Arc<RuntimeContext>,
}

impl SignalRuntime {
    pub fn new(config: RuntimeConfig, context: RuntimeContext) -> Self {
        Self {
            config,
            context: Arc::new(context),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    fn symbols_for(&self, strategy: &Strategy) -> Vec<String> {
        if strategy.assets.is_empty() {
            self.config.symbols.clone()
        } else {
            strategy.assets.clone()
        }
    }

    /// Evaluate every instrument of `strategy` once. One instrument failing
    /// never stops the others.
    pub async fn run_cycle(&self, strategy: &Strategy) -> CycleReport {
        let symbols = self.symbols_for(strategy);
        let mut report = CycleReport::default();

        if let Err(e) = strategy.params.validate() {
            let err = EngineError::from(e);
            warn!(strategy = %strategy.name, error = %err, "Strategy {} has invalid params", strategy.name);
            report.skipped = symbols
                .into_iter()
                .map(|s| SkippedInstrument::from_error(s, &err))
                .collect();
            return report;
        }

        info!(
            strategy = %strategy.name,
            instruments = symbols.len(),
            concurrency = self.config.max_concurrency,
            "Starting signal cycle for {} over {} instruments",
            strategy.name,
            symbols.len()
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let strategy = Arc::new(strategy.clone());
        let mut pending = symbols.clone();
        let mut tasks = JoinSet::new();

        for symbol in symbols {
            let semaphore = semaphore.clone();
            let context = self.context.clone();
            let strategy = strategy.clone();
            let interval = self.config.interval.clone();
            let limit = self.config.candle_limit;

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome =
                    evaluate_instrument(&context, &symbol, &interval, limit, &strategy).await;
                (symbol, outcome)
            });
        }

        let mut task_errors = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (symbol, outcome) = match joined {
                Ok(done) => done,
                Err(e) => {
                    error!(error = %e, "Evaluation task failed: {}", e);
                    task_errors.push(e.to_string());
                    continue;
                }
            };
            mark_done(&mut pending, &symbol);
            match outcome {
                Ok(Some(signal)) => report.signals.push(signal),
                Ok(None) => {}
                Err(e) => {
                    warn!(symbol = %symbol, reason = e.reason(), error = %e, "Skipping {}: {}", symbol, e);
                    if let Some(ref metrics) = self.context.metrics {
                        metrics.instruments_skipped_total.inc();
                    }
                    report.skipped.push(SkippedInstrument::from_error(symbol, &e));
                }
            }
        }
        for symbol in pending {
            let err = EngineError::Task(task_errors.join("; "));
            if let Some(ref metrics) = self.context.metrics {
                metrics.instruments_skipped_total.inc();
            }
            report.skipped.push(SkippedInstrument::from_error(symbol, &err));
        }

        report.signals.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        report.skipped.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        info!(
            strategy = %strategy.name,
            signals = report.signals.len(),
            skipped = report.skipped.len(),
            "Signal cycle complete: {} signals, {} skipped",
            report.signals.len(),
            report.skipped.len()
        );

        report
    }

    /// Run one cycle per active strategy in the book.
    pub async fn run_book(&self, book: &StrategyBook) -> CycleReport {
        let mut combined = CycleReport::default();
        for strategy in book.active() {
            let report = self.run_cycle(strategy).await;
            combined.signals.extend(report.signals);
            combined.skipped.extend(report.skipped);
        }
        combined
    }

    /// Summarize every configured instrument under each period label and store the stats.
    pub async fn run_aggregation(&self, periods: &[AggregationPeriod]) -> AggregationReport {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let periods: Arc<[AggregationPeriod]> = periods.into();
        let mut pending = self.config.symbols.clone();
        let mut tasks = JoinSet::new();

        for symbol in self.config.symbols.clone() {
            let semaphore = semaphore.clone();
            let context = self.context.clone();
            let periods = periods.clone();
            let interval = self.config.interval.clone();
            let limit = self.config.candle_limit;

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = aggregate_instrument(&context, &symbol, &interval, limit, &periods).await;
                (symbol, outcome)
            });
        }

        let mut report = AggregationReport::default();
        let mut task_errors = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (symbol, outcome) = match joined {
                Ok(done) => done,
                Err(e) => {
                    error!(error = %e, "Aggregation task failed: {}", e);
                    task_errors.push(e.to_string());
                    continue;
                }
            };
            mark_done(&mut pending, &symbol);
            report.stats.extend(outcome.stored);
            if let Some(e) = outcome.error {
                warn!(symbol = %symbol, reason = e.reason(), error = %e, "Skipping aggregation for {}: {}", symbol, e);
                report.skipped.push(SkippedInstrument::from_error(symbol, &e));
            }
        }
        for symbol in pending {
            let err = EngineError::Task(task_errors.join("; "));
            report.skipped.push(SkippedInstrument::from_error(symbol, &err));
        }

        report.stats.sort_by(|a, b| {
            a.asset
                .cmp(&b.asset)
                .then_with(|| a.period.as_str().cmp(b.period.as_str()))
        });
        report.skipped.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        report
    }

    /// Evaluate the book's active strategies every `evaluation_interval_seconds`
    /// until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run_periodic(&self, book: &StrategyBook, mut shutdown: watch::Receiver<bool>) {
        let period = Duration::from_secs(self.config.evaluation_interval_seconds.max(1));
        let mut ticker = tokio::time::interval(period);

        info!(
            interval = self.config.evaluation_interval_seconds,
            "SignalRuntime: evaluating every {}s",
            self.config.evaluation_interval_seconds
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = self.run_book(book).await;
                    debug!(
                        signals = report.signals.len(),
                        skipped = report.skipped.len(),
                        "Periodic cycle finished"
                    );
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("SignalRuntime: shutting down");
                        break;
                    }
                }
            }
        }
    }
}

async fn evaluate_instrument(
    context: &RuntimeContext,
    symbol: &str,
    interval: &str,
    limit: usize,
    strategy: &Strategy,
) -> Result<Option<Signal>> {
    let start = Instant::now();
    if let Some(ref metrics) = context.metrics {
        metrics.signal_evaluations_active.inc();
        metrics.signal_evaluations_total.inc();
    }

    let outcome = evaluate_pipeline(context, symbol, interval, limit, strategy).await;

    if let Some(ref metrics) = context.metrics {
        metrics
            .signal_evaluation_duration_seconds
            .observe(start.elapsed().as_secs_f64());
        metrics.signal_evaluations_active.dec();
        if matches!(outcome, Ok(Some(_))) {
            metrics.signals_emitted_total.inc();
        }
    }

    outcome
}

async fn evaluate_pipeline(
    context: &RuntimeContext,
    symbol: &str,
    interval: &str,
    limit: usize,
    strategy: &Strategy,
) -> Result<Option<Signal>> {
    let raw = context
        .data_provider
        .get_candles(symbol, limit)
        .await
        .map_err(|e| EngineError::MarketData(e.to_string()))?;

    let series = validate_series(symbol, interval, &raw, strategy.params.required_length())?;

    let signal = match SignalEngine::evaluate_strategy(&series, strategy)? {
        Some(signal) => signal,
        None => return Ok(None),
    };

    let signal = match context.narrator {
        Some(ref narrator) => {
            let request = NarrativeRequest::from_signal(&signal, &series);
            match narrator.narrate(&request).await {
                Some(text) => signal.with_narrative(text),
                None => {
                    debug!(symbol = %symbol, "No narrative for {}", symbol);
                    signal
                }
            }
        }
        None => signal,
    };

    context
        .store
        .store_signal(&signal)
        .await
        .map_err(|e| EngineError::Storage(e.to_string()))?;

    Ok(Some(signal))
}

/// Stats stored for one instrument, and the failure that stopped it, if any.
struct AggregationOutcome {
    stored: Vec<AggregatedStats>,
    error: Option<EngineError>,
}

async fn aggregate_instrument(
    context: &RuntimeContext,
    symbol: &str,
    interval: &str,
    limit: usize,
    periods: &[AggregationPeriod],
) -> AggregationOutcome {
    let computed = match compute_aggregations(context, symbol, interval, limit, periods).await {
        Ok(computed) => computed,
        Err(e) => {
            return AggregationOutcome {
                stored: Vec::new(),
                error: Some(e),
            }
        }
    };

    let mut stored = Vec::with_capacity(computed.len());
    for stats in computed {
        if let Err(e) = context.store.store_stats(&stats).await {
            return AggregationOutcome {
                stored,
                error: Some(EngineError::Storage(e.to_string())),
            };
        }
        if let Some(ref metrics) = context.metrics {
            metrics.aggregations_total.inc();
        }
        stored.push(stats);
    }

    info!(
        asset = %symbol,
        periods = stored.len(),
        "Aggregated statistics for {}",
        symbol
    );

    AggregationOutcome {
        stored,
        error: None,
    }
}

async fn compute_aggregations(
    context: &RuntimeContext,
    symbol: &str,
    interval: &str,
    limit: usize,
    periods: &[AggregationPeriod],
) -> Result<Vec<AggregatedStats>> {
    let raw = context
        .data_provider
        .get_candles(symbol, limit)
        .await
        .map_err(|e| EngineError::MarketData(e.to_string()))?;

    let series = validate_series(symbol, interval, &raw, 1)?;

    periods
        .iter()
        .map(|period| aggregate(symbol, &series, *period).map_err(EngineError::from))
        .collect()
}

/// Drop one occurrence of `symbol` from the instruments still awaiting a result.
fn mark_done(pending: &mut Vec<String>, symbol: &str) {
    if let Some(pos) = pending.iter().position(|s| s == symbol) {
        pending.swap_remove(pos);
    }
}
