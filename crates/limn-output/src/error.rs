//! Error types for artifact generation.

use std::path::PathBuf;

use limn_model::ModelError;
use thiserror::Error;

/// Errors that can occur while building or writing Limn artifacts.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Input data or an identifier failed validation.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A graph metric names a datasource or column that was not supplied.
    #[error("graph references unknown column '{column}' in datasource '{source_id}'")]
    UnknownColumnReference { source_id: String, column: String },

    // === File System Errors ===
    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create, write or flush an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    #[error("failed to write datafile {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OutputError::UnknownColumnReference {
            source_id: "source1".to_string(),
            column: "z".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "graph references unknown column 'z' in datasource 'source1'"
        );
    }

    #[test]
    fn test_model_error_passes_through() {
        let err: OutputError = ModelError::DateColumnRequired {
            column: "date".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "date column 'date' cannot be removed");
    }
}
