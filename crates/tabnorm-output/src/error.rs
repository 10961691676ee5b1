//! Error types for output generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error on an output path.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving the finished temp file into place failed.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output path has no file name.
    #[error("invalid output path: {path}")]
    InvalidPath { path: PathBuf },

    /// CSV serialization failed.
    #[error("failed to write CSV {target_name}: {source}")]
    CsvWrite {
        target_name: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
