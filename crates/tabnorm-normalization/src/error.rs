//! Error types for column normalization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by normalizers, the row reconciler, and policy loading.
///
/// A normalizer error never escapes a cell: the policy table turns it into a
/// [`CellOutcome::Fallback`](crate::CellOutcome::Fallback). The remaining
/// variants are surfaced to the caller.
#[derive(Debug, Error)]
pub enum NormalizationError {
    // === Cell Errors ===
    /// A normalizer could not produce a canonical value.
    #[error("{normalizer} normalizer rejected value: {reason}")]
    Rejected {
        normalizer: &'static str,
        reason: String,
    },

    // === Shape Errors ===
    /// Row is longer than the header and the overflow policy rejects it.
    #[error("row has {actual} fields but the header has {expected}")]
    RowTooLong { expected: usize, actual: usize },

    // === Policy File Errors ===
    /// Policy file could not be read.
    #[error("failed to read policy file {path}: {source}")]
    PolicyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Policy file is not valid TOML or names an unknown normalizer.
    #[error("invalid policy file {path}: {source}")]
    PolicyParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl NormalizationError {
    /// Builds a [`NormalizationError::Rejected`] for a named normalizer.
    pub fn rejected(normalizer: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            normalizer,
            reason: reason.into(),
        }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizationError>;
