//! Error types for delimited input ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading delimited input.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// The csv reader rejected a record.
    #[error("failed to parse {input}: {source}")]
    CsvParse {
        input: String,
        #[source]
        source: csv::Error,
    },

    /// The input has no header and no records.
    #[error("input {input} is empty")]
    EmptyInput { input: String },

    /// A record does not have one field per header name.
    #[error("{input} line {line}: expected {expected} fields, found {found}")]
    HeaderMismatch {
        input: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Delimiters must be a single byte.
    #[error("invalid delimiter '{value}': expected a single character or '\\t'")]
    InvalidDelimiter { value: String },

    // === Column Selection Errors ===
    /// A positional selector points past the last column.
    #[error("column index {index} out of range for {width} columns")]
    ColumnIndexOutOfRange { index: usize, width: usize },

    /// A named selector matches no header.
    #[error("column '{column}' not found in header [{}]", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
