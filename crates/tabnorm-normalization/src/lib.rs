//! Column normalization for delimited tabular data.
//!
//! # Overview
//!
//! This crate provides:
//! - **Field normalizers**: whitespace, date, boolean, and version rules
//! - **Column policy table**: column name to normalizer dispatch, with a
//!   trim-only default for unlisted columns
//! - **Policy files**: TOML overrides for the column table
//! - **Row reconciliation**: pad or shrink rows to the header width
//!
//! # Example
//!
//! ```ignore
//! use tabnorm_normalization::{OverflowPolicy, RowReconciler, default_policy};
//!
//! let policy = default_policy();
//! let reconciler = RowReconciler::new(header.len(), OverflowPolicy::Truncate);
//!
//! let row = reconciler.reconcile(raw_fields)?;
//! let cells: Vec<String> = header
//!     .iter()
//!     .zip(&row.fields)
//!     .map(|(column, raw)| policy.normalize_cell(column, raw).into_value())
//!     .collect();
//! ```
//!
//! # Design Principles
//!
//! - **Total normalizers**: every input produces output; nothing is null
//! - **Per-cell containment**: a failing normalizer keeps the trimmed raw value
//! - **Table-driven**: adding a column rule never touches the pipeline

mod error;
mod policy;
mod policy_file;
mod reconcile;
mod types;

pub mod normalization;

// Core types
pub use types::{CellOutcome, NormalizerKind};

// Error type
pub use error::{NormalizationError, Result};

// Column policy table
pub use policy::{
    ColumnPolicy, DEFAULT_COLUMN_RULES, FieldNormalizer, FunctionNormalizer, apply_normalizer,
    build_default_policy, default_policy,
};
pub use policy_file::PolicyFile;

// Row reconciliation
pub use reconcile::{
    MERGE_SEPARATOR, OverflowPolicy, ReconciledRow, Reconciliation, RowReconciler,
    reconcile_row,
};

// Field normalizers
pub use normalization::{
    normalize_boolean, normalize_date, normalize_version, normalize_whitespace,
};
