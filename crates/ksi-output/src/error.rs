//! Error types for output generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the cleaned tables.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output file.
    #[error("failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a table.
    #[error("failed to write CSV {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
