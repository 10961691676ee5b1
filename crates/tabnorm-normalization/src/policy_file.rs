//! Operator-facing policy files.
//!
//! A policy file is TOML with a single `[columns]` table:
//!
//! ```toml
//! [columns]
//! FECHA = "date"
//! ESTADO = "boolean"
//! "FECHA ALTA" = "date"
//! ```
//!
//! Entries extend or override the policy they are applied to.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NormalizationError, Result};
use crate::policy::ColumnPolicy;
use crate::types::NormalizerKind;

/// Parsed policy file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    /// Column name to built-in normalizer.
    #[serde(default)]
    pub columns: BTreeMap<String, NormalizerKind>,
}

impl PolicyFile {
    /// Parses policy TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown normalizer names.
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads and parses a policy file.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizationError::PolicyRead`] if the file cannot be read and
    /// [`NormalizationError::PolicyParse`] if it is not a valid policy.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| NormalizationError::PolicyRead {
                path: path.to_path_buf(),
                source,
            })?;
        let file = Self::from_toml_str(&contents).map_err(|source| {
            NormalizationError::PolicyParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tracing::debug!(
            path = %path.display(),
            columns = file.columns.len(),
            "Loaded policy file"
        );
        Ok(file)
    }

    /// Registers every entry into `policy`, replacing existing rules.
    pub fn apply_to(&self, policy: &mut ColumnPolicy) {
        for (column, kind) in &self.columns {
            let column = column.trim();
            if column.is_empty() {
                tracing::warn!("Ignoring policy entry with an empty column name");
                continue;
            }
            if let Some(previous) = policy.lookup(column) {
                tracing::debug!(
                    column,
                    previous = previous.name(),
                    normalizer = kind.as_str(),
                    "Policy file overrides column rule"
                );
            }
            policy.register_kind(column, *kind);
        }
    }
}
