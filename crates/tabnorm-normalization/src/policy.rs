//! Column policy table.
//!
//! Maps exact, case-sensitive column names to a [`FieldNormalizer`]. Columns
//! that are not registered fall back to whitespace trimming. New column rules
//! are table entries; the pipeline never branches on column names.
//!
//! # Example
//!
//! ```ignore
//! use tabnorm_normalization::{ColumnPolicy, NormalizerKind, default_policy};
//!
//! let policy = default_policy();
//! let cell = policy.normalize_cell("FECHA", " 05/03/2024 ");
//! assert_eq!(cell.value(), "2024-03-05");
//!
//! let custom = ColumnPolicy::new().with_kind("ALTA", NormalizerKind::Date);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::Result;
use crate::normalization::normalize_whitespace;
use crate::types::{CellOutcome, NormalizerKind};

/// A normalizer for one semantic column type.
///
/// Implementations receive the already trimmed cell. Returning an error makes
/// the cell fall back to that trimmed value.
pub trait FieldNormalizer: Send + Sync {
    /// Short name shown in summaries and logs (e.g. "date").
    fn name(&self) -> &'static str;

    /// Normalizes one trimmed cell value.
    ///
    /// # Errors
    ///
    /// Returns an error if no canonical value can be produced.
    fn normalize(&self, value: &str) -> Result<String>;
}

impl FieldNormalizer for NormalizerKind {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn normalize(&self, value: &str) -> Result<String> {
        Ok(self.apply(value))
    }
}

/// Adapts a plain `fn(&str) -> String` to [`FieldNormalizer`].
pub struct FunctionNormalizer {
    name: &'static str,
    normalize_fn: fn(&str) -> String,
}

impl FunctionNormalizer {
    pub fn new(name: &'static str, normalize_fn: fn(&str) -> String) -> Self {
        Self { name, normalize_fn }
    }
}

impl FieldNormalizer for FunctionNormalizer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn normalize(&self, value: &str) -> Result<String> {
        Ok((self.normalize_fn)(value))
    }
}

/// Column name to normalizer mapping.
///
/// Built once before a run and read-only afterwards. Cloning shares the
/// registered normalizers.
#[derive(Clone)]
pub struct ColumnPolicy {
    normalizers: HashMap<String, Arc<dyn FieldNormalizer>>,
    default_normalizer: Arc<dyn FieldNormalizer>,
}

impl ColumnPolicy {
    /// Creates an empty, trim-only policy.
    pub fn new() -> Self {
        Self {
            normalizers: HashMap::new(),
            default_normalizer: Arc::new(NormalizerKind::Whitespace),
        }
    }

    /// Registers a normalizer for a column.
    ///
    /// Returns the previously registered normalizer, if any.
    pub fn register(
        &mut self,
        column: impl Into<String>,
        normalizer: Arc<dyn FieldNormalizer>,
    ) -> Option<Arc<dyn FieldNormalizer>> {
        self.normalizers.insert(column.into(), normalizer)
    }

    /// Registers a built-in normalizer for a column.
    pub fn register_kind(&mut self, column: impl Into<String>, kind: NormalizerKind) {
        self.register(column, Arc::new(kind));
    }

    /// Builder form of [`ColumnPolicy::register_kind`].
    #[must_use]
    pub fn with_kind(mut self, column: impl Into<String>, kind: NormalizerKind) -> Self {
        self.register_kind(column, kind);
        self
    }

    /// Removes a column rule, leaving the column trim-only.
    pub fn remove(&mut self, column: &str) -> Option<Arc<dyn FieldNormalizer>> {
        self.normalizers.remove(column)
    }

    /// Returns the registered normalizer for a column, without the default.
    pub fn lookup(&self, column: &str) -> Option<&dyn FieldNormalizer> {
        self.normalizers.get(column).map(Arc::as_ref)
    }

    /// Normalizer applied to columns without a rule.
    pub fn default_normalizer(&self) -> &dyn FieldNormalizer {
        self.default_normalizer.as_ref()
    }

    /// Returns the normalizer for a column, or the trim-only default.
    pub fn get(&self, column: &str) -> &dyn FieldNormalizer {
        self.lookup(column)
            .unwrap_or(self.default_normalizer.as_ref())
    }

    /// Returns true if the column has a registered rule.
    pub fn contains(&self, column: &str) -> bool {
        self.normalizers.contains_key(column)
    }

    /// Number of registered column rules.
    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    /// Returns true if no column rules are registered.
    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Registered `(column, normalizer name)` pairs, sorted by column.
    pub fn entries(&self) -> Vec<(&str, &'static str)> {
        let mut entries: Vec<(&str, &'static str)> = self
            .normalizers
            .iter()
            .map(|(column, normalizer)| (column.as_str(), normalizer.name()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Trims a raw cell, then applies the column's normalizer.
    ///
    /// Normalizer errors are contained here: the cell keeps its trimmed
    /// value and the outcome is [`CellOutcome::Fallback`].
    pub fn normalize_cell(&self, column: &str, raw: &str) -> CellOutcome {
        apply_normalizer(self.get(column), raw)
    }
}

impl Default for ColumnPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ColumnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Trims `raw` and runs `normalizer`, falling back to the trimmed value.
pub fn apply_normalizer(normalizer: &dyn FieldNormalizer, raw: &str) -> CellOutcome {
    let trimmed = normalize_whitespace(raw);
    match normalizer.normalize(&trimmed) {
        Ok(value) => CellOutcome::Normalized(value),
        Err(error) => CellOutcome::Fallback {
            value: trimmed,
            reason: error.to_string(),
        },
    }
}

/// Built-in column rules for the spreadsheet export.
pub const DEFAULT_COLUMN_RULES: [(&str, NormalizerKind); 7] = [
    ("FECHA", NormalizerKind::Date),
    ("YT", NormalizerKind::Boolean),
    ("IG", NormalizerKind::Boolean),
    ("TT", NormalizerKind::Boolean),
    ("TH", NormalizerKind::Boolean),
    ("X", NormalizerKind::Boolean),
    ("VERSION", NormalizerKind::Version),
];

/// Cached default policy.
static DEFAULT_POLICY: OnceLock<ColumnPolicy> = OnceLock::new();

/// Returns the built-in policy (see [`DEFAULT_COLUMN_RULES`]).
pub fn default_policy() -> &'static ColumnPolicy {
    DEFAULT_POLICY.get_or_init(build_default_policy)
}

/// Builds a fresh copy of the built-in policy.
pub fn build_default_policy() -> ColumnPolicy {
    let mut policy = ColumnPolicy::new();
    for (column, kind) in DEFAULT_COLUMN_RULES {
        policy.register_kind(column, kind);
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_column_is_trimmed() {
        let policy = ColumnPolicy::new();
        assert_eq!(policy.get("TITULO").name(), "whitespace");
        assert_eq!(policy.normalize_cell("TITULO", "  Hola  ").value(), "Hola");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let policy = build_default_policy();
        assert!(policy.contains("FECHA"));
        assert!(!policy.contains("fecha"));
        assert!(policy.lookup("fecha").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut policy = ColumnPolicy::new().with_kind("A", NormalizerKind::Date);
        let previous = policy.register("A", Arc::new(NormalizerKind::Boolean));
        assert_eq!(previous.map(|p| p.name()), Some("date"));
        assert_eq!(policy.get("A").name(), "boolean");
    }

    #[test]
    fn test_function_normalizer() {
        fn shout(value: &str) -> String {
            value.to_uppercase()
        }
        let mut policy = ColumnPolicy::new();
        policy.register("NAME", Arc::new(FunctionNormalizer::new("upper", shout)));
        assert_eq!(policy.normalize_cell("NAME", " ana ").value(), "ANA");
        assert_eq!(policy.entries(), vec![("NAME", "upper")]);
    }
}
