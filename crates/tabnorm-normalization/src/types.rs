//! Core types shared by the policy table and the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::normalization::{
    normalize_boolean, normalize_date, normalize_version, normalize_whitespace,
};

/// Built-in normalizer selectable from a policy file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizerKind {
    /// Trim only (the default for unlisted columns).
    Whitespace,
    /// Reformat dates to `YYYY-MM-DD`.
    Date,
    /// Canonicalize to `true` / `false`.
    Boolean,
    /// Default empty values to `V1`.
    Version,
}

impl NormalizerKind {
    /// All built-in kinds.
    pub const fn all() -> &'static [NormalizerKind] {
        &[Self::Whitespace, Self::Date, Self::Boolean, Self::Version]
    }

    /// Name used in policy files and summaries.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Version => "version",
        }
    }

    /// Applies the normalizer to a raw value.
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Whitespace => normalize_whitespace(value),
            Self::Date => normalize_date(value),
            Self::Boolean => normalize_boolean(value),
            Self::Version => normalize_version(value),
        }
    }
}

impl fmt::Display for NormalizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown normalizer '{s}'"))
    }
}

/// Result of normalizing a single cell.
///
/// A failing normalizer never aborts the row: its cell keeps the trimmed raw
/// value and the outcome records why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    /// Normalizer produced a value.
    Normalized(String),
    /// Normalizer failed; the trimmed raw value is kept.
    Fallback { value: String, reason: String },
}

impl CellOutcome {
    /// The value to emit.
    pub fn value(&self) -> &str {
        match self {
            Self::Normalized(value) | Self::Fallback { value, .. } => value,
        }
    }

    /// Consumes the outcome, returning the value to emit.
    pub fn into_value(self) -> String {
        match self {
            Self::Normalized(value) | Self::Fallback { value, .. } => value,
        }
    }

    /// Returns true if the normalizer failed.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}
