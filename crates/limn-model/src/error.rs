//! Error types for table construction and identifiers.

use thiserror::Error;

use crate::value::ColumnType;

/// Errors raised while building or editing a [`Table`](crate::Table).
///
/// Every variant carries enough context (row index, column name or raw value)
/// to locate the offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    // === Input Shape Errors ===
    /// A row-mapping input row lacks a key that other rows define.
    #[error("row {row} is missing column '{column}'")]
    MalformedRow { row: usize, column: String },

    /// A positional row does not have one value per label.
    #[error("row {row} has {found} values but {expected} labels were given")]
    LabelMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Column-major input with unequal column lengths.
    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column name '{column}'")]
    DuplicateColumn { column: String },

    // === Date Column Errors ===
    /// The designated date column is absent.
    #[error("date column '{column}' not found in columns [{}]", .available.join(", "))]
    MissingDateColumn {
        column: String,
        available: Vec<String>,
    },

    /// A date column value could not be coerced to a calendar date.
    #[error("row {row}: cannot interpret '{value}' as a date")]
    DateParse { row: usize, value: String },

    /// The date column was rebuilt with non-date values.
    #[error("date column '{column}' must hold dates, found {found} values")]
    DateColumnType { column: String, found: ColumnType },

    /// An edit tried to remove the date column.
    #[error("date column '{column}' cannot be removed")]
    DateColumnRequired { column: String },

    // === Lookup Errors ===
    /// A transform referenced a column that does not exist.
    #[error("column '{column}' not found")]
    UnknownColumn { column: String },

    /// An identifier is empty or unsafe to use as a file name.
    #[error("invalid identifier '{value}': {reason}")]
    InvalidSlug { value: String, reason: &'static str },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::MalformedRow {
            row: 1,
            column: "y".to_string(),
        };
        assert_eq!(err.to_string(), "row 1 is missing column 'y'");
    }

    #[test]
    fn test_missing_date_column_lists_available() {
        let err = ModelError::MissingDateColumn {
            column: "date".to_string(),
            available: vec!["x".to_string(), "y".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "date column 'date' not found in columns [x, y]"
        );
    }
}
