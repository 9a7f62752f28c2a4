//! Error types for loading fleet datasets.

use thiserror::Error;

/// Failure to bring a fleet table into memory. Fatal to session start.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to read CSV from {source_name}: {error}")]
    Csv {
        source_name: String,
        #[source]
        error: csv::Error,
    },

    #[error("{source_name} is missing required column '{column}'")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },

    #[error("{source_name}, line {line}: {error}")]
    InvalidRow {
        source_name: String,
        line: u64,
        #[source]
        error: csv::Error,
    },

    #[error("{source_name}, line {line}: {message}")]
    InvalidValue {
        source_name: String,
        line: u64,
        message: String,
    },
}
