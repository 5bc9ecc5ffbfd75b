//! Error types for normalization and pivoting.

use limn_model::ModelError;
#[cfg(feature = "pivot")]
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while reshaping input before it becomes a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The reshaped data violates a table invariant.
    #[error(transparent)]
    Model(#[from] ModelError),

    // === Pivot Errors ===
    /// A pivot selector named a column that is not in the input.
    #[error("pivot column '{column}' not found")]
    MissingColumn { column: String },

    /// The value column holds something that cannot be summed.
    #[error("row {row}: value '{value}' in column '{column}' is not numeric")]
    NonNumericValue {
        row: usize,
        column: String,
        value: String,
    },

    /// The aggregation engine rejected the frame.
    #[cfg(feature = "pivot")]
    #[error("pivot aggregation failed: {0}")]
    Polars(#[from] PolarsError),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::NonNumericValue {
            row: 4,
            column: "count".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "row 4: value 'n/a' in column 'count' is not numeric"
        );
    }

    #[test]
    fn test_model_error_is_transparent() {
        let err = TransformError::from(ModelError::UnknownColumn {
            column: "x".to_string(),
        });
        assert_eq!(err.to_string(), "column 'x' not found");
    }
}
