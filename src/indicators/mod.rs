pub mod calculator;
pub mod error;
pub mod validation;

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use calculator::compute_indicators;
pub use error::IndicatorError;
pub use validation::*;
