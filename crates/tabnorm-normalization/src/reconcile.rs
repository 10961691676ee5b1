//! Row reconciliation.
//!
//! Every row is brought to the header's width before any cell is normalized:
//! short rows are padded with empty fields and long rows are handled by the
//! configured [`OverflowPolicy`]. The default truncates silently.

use serde::{Deserialize, Serialize};

use crate::error::{NormalizationError, Result};

/// Separator used when merging overflow fields into the last column.
pub const MERGE_SEPARATOR: &str = ",";

/// How rows longer than the header are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Drop trailing excess fields.
    #[default]
    Truncate,
    /// Join the last column and all excess fields with [`MERGE_SEPARATOR`].
    MergeIntoLast,
    /// Fail with [`NormalizationError::RowTooLong`].
    Reject,
}

/// What the reconciler did to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Unchanged,
    Padded { added: usize },
    Truncated { dropped: usize },
    Merged { merged: usize },
}

/// A row of exactly header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledRow {
    pub fields: Vec<String>,
    pub action: Reconciliation,
}

/// Reconciles rows against a fixed header width.
#[derive(Debug, Clone, Copy)]
pub struct RowReconciler {
    width: usize,
    overflow: OverflowPolicy,
}

impl RowReconciler {
    pub fn new(width: usize, overflow: OverflowPolicy) -> Self {
        Self { width, overflow }
    }

    /// Header width every reconciled row will have.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Pads or shrinks `fields` to the header width.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizationError::RowTooLong`] for an over-length row
    /// under [`OverflowPolicy::Reject`].
    pub fn reconcile(&self, mut fields: Vec<String>) -> Result<ReconciledRow> {
        let actual = fields.len();
        let width = self.width;

        let action = if actual < width {
            fields.resize(width, String::new());
            Reconciliation::Padded {
                added: width - actual,
            }
        } else if actual > width {
            let excess = actual - width;
            match self.overflow {
                OverflowPolicy::Reject => {
                    return Err(NormalizationError::RowTooLong {
                        expected: width,
                        actual,
                    });
                }
                OverflowPolicy::MergeIntoLast if width > 0 => {
                    let merged = fields.split_off(width - 1).join(MERGE_SEPARATOR);
                    fields.push(merged);
                    Reconciliation::Merged { merged: excess }
                }
                OverflowPolicy::MergeIntoLast | OverflowPolicy::Truncate => {
                    fields.truncate(width);
                    Reconciliation::Truncated { dropped: excess }
                }
            }
        } else {
            Reconciliation::Unchanged
        };

        Ok(ReconciledRow { fields, action })
    }
}

/// Pads or truncates `fields` to `width` (the default overflow policy).
pub fn reconcile_row(mut fields: Vec<String>, width: usize) -> Vec<String> {
    fields.resize(width, String::new());
    fields
}
