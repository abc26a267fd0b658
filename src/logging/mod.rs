//! Logging initialization with environment-based formatters
//!
//! Logs go to stderr so report output on stdout stays machine-readable.

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging with `info` as the default filter.
pub fn init_logging() {
    init_logging_with("info");
}

/// Initialize logging. `RUST_LOG` overrides `default_directive`.
///
/// Production gets JSON lines; anything else gets coloured compact output.
/// Calling this twice is a no-op.
pub fn init_logging_with(default_directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if is_production(&get_environment()) {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}
