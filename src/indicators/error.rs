use thiserror::Error;

/// Rejection reasons raised before or during indicator computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("series is empty")]
    EmptySeries,

    #[error("missing field '{field}' at row {index}")]
    MissingField { index: usize, field: &'static str },

    #[error("invalid series: {0}")]
    InvalidSeries(String),

    #[error("insufficient data: need {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

impl IndicatorError {
    /// Short machine-readable reason, as reported to the orchestrator.
    pub fn reason(&self) -> &'static str {
        match self {
            IndicatorError::EmptySeries => "empty",
            IndicatorError::MissingField { .. } => "missing-field",
            IndicatorError::InvalidSeries(_) => "invalid-series",
            IndicatorError::InsufficientData { .. } => "insufficient-data",
        }
    }
}
