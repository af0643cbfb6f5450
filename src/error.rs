//! Error types for the breath analysis engine

use std::fmt;

/// Errors that can occur during feature extraction
///
/// Every error is fatal to the current feature-row construction: the
/// pipeline never returns a partial row, since a partial row would
/// silently break the fixed column order the downstream models were
/// trained on.
#[derive(Debug, Clone)]
pub enum FeatureError {
    /// Signal too short or malformed (NaN/Inf samples, length <= 1)
    InvalidInput(String),

    /// A configured sensor channel is absent from the input table
    MissingChannel(String),

    /// Channel or vitals field set does not match the configured schema
    ColumnMismatch(String),

    /// Numerical error (overflow, non-finite intermediate, etc.)
    NumericalError(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            FeatureError::MissingChannel(msg) => write!(f, "Missing channel: {}", msg),
            FeatureError::ColumnMismatch(msg) => write!(f, "Column mismatch: {}", msg),
            FeatureError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for FeatureError {}
