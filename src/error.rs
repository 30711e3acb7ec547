//! Error types for the analysis core

use thiserror::Error;

/// Errors raised by the numeric analysis functions
///
/// Ingestion, configuration loading and the CLI wrap these in `anyhow::Error`
/// with file context; the core itself never panics on bad input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// An operation that needs at least one element received none
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value was NaN or infinite and would poison any aggregate
    #[error("Non-finite value {value} at position {index}")]
    NonFiniteValue { index: usize, value: f64 },

    /// Relative error against a zero simulation value
    #[error("Relative error for '{parameter}' is not computable: simulation value is zero")]
    UndefinedRatio { parameter: String },

    /// Too few points to fit a line through
    #[error("Degenerate series: need at least {required} points, got {actual}")]
    DegenerateSeries { required: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the analysis core
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Reject empty or non-finite input before any arithmetic touches it
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(AnalysisError::InvalidInput(format!(
            "{} requires at least one value",
            what
        )));
    }

    ensure_all_finite(values)
}

/// Reject NaN or infinite values; an empty slice passes
pub(crate) fn ensure_all_finite(values: &[f64]) -> Result<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(AnalysisError::NonFiniteValue { index, value }),
        None => Ok(()),
    }
}
