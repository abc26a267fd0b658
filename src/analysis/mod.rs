//! Trend, volatility and sentiment statistics, independent of the signal path.

pub mod aggregator;
pub mod sentiment;
pub mod trend;
pub mod volatility;

pub use aggregator::aggregate;
pub use sentiment::classify_sentiment;
pub use trend::{analyze_trend, calculate_trend};
pub use volatility::{calculate_volatility, compute_volatility};
