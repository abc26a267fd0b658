//! Prometheus metrics for evaluation cycles.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub signal_evaluations_total: IntCounter,
    pub signals_emitted_total: IntCounter,
    pub instruments_skipped_total: IntCounter,
    pub aggregations_total: IntCounter,
    pub signal_evaluations_active: IntGauge,
    pub signal_evaluation_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let signal_evaluations_total = IntCounter::new(
            "signal_evaluations_total",
            "Instrument evaluations attempted",
        )?;
        let signals_emitted_total =
            IntCounter::new("signals_emitted_total", "Signals emitted")?;
        let instruments_skipped_total = IntCounter::new(
            "instruments_skipped_total",
            "Instruments skipped because of a per-instrument failure",
        )?;
        let aggregations_total =
            IntCounter::new("aggregations_total", "Aggregated statistics produced")?;
        let signal_evaluations_active = IntGauge::new(
            "signal_evaluations_active",
            "Instrument evaluations currently running",
        )?;
        let signal_evaluation_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "signal_evaluation_duration_seconds",
                "Time to evaluate one instrument",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        )?;

        registry.register(Box::new(signal_evaluations_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(instruments_skipped_total.clone()))?;
        registry.register(Box::new(aggregations_total.clone()))?;
        registry.register(Box::new(signal_evaluations_active.clone()))?;
        registry.register(Box::new(signal_evaluation_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            signal_evaluations_total,
            signals_emitted_total,
            instruments_skipped_total,
            aggregations_total,
            signal_evaluations_active,
            signal_evaluation_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
