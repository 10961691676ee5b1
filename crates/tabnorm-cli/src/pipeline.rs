//! Table normalization pipeline.
//!
//! A run moves through three states:
//!
//! 1. **Uninitialized**: nothing read. An input without a header record ends
//!    the run with [`PipelineError::EmptyInput`].
//! 2. **Header read**: names are trimmed and written first, and every column
//!    is bound to its normalizer once.
//! 3. **Row streaming**: each record is reconciled to the header width, each
//!    cell is trimmed and normalized, and the row is written immediately.
//!
//! End of input ends the run successfully. Normalizer failures only affect
//! the cell they occur in.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, info_span, trace, warn};

use tabnorm_ingest::{IngestError, RawRecord, TableHeader, TableReader};
use tabnorm_normalization::{
    CellOutcome, ColumnPolicy, FieldNormalizer, NormalizationError, OverflowPolicy, Reconciliation,
    RowReconciler, apply_normalizer,
};
use tabnorm_output::{AtomicFile, OutputError, TableWriter};

use crate::logging::redact_value;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input has no header record.
    #[error("input is empty: {source_name}")]
    EmptyInput { source_name: String },

    #[error(transparent)]
    Ingest(IngestError),

    /// A row could not be reconciled (only under [`OverflowPolicy::Reject`]).
    #[error("line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: NormalizationError,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl From<IngestError> for PipelineError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::EmptyInput { source_name } => Self::EmptyInput { source_name },
            other => Self::Ingest(other),
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Options for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Handling of rows longer than the header.
    pub overflow: OverflowPolicy,
}

impl PipelineOptions {
    #[must_use]
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }
}

/// Where normalized output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Written atomically to this path.
    File(PathBuf),
    /// Processed fully but discarded (dry run).
    Discard,
}

/// Per-column counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStats {
    pub name: String,
    /// Name of the normalizer bound to the column.
    pub normalizer: &'static str,
    /// Whether the column has an explicit policy entry.
    pub has_rule: bool,
    /// Cells whose output differs from the raw input.
    pub changed: u64,
    /// Cells that fell back to the trimmed input.
    pub fallbacks: u64,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub source_name: String,
    /// Data records read (header excluded).
    pub rows_read: u64,
    /// Data records written (header excluded).
    pub rows_written: u64,
    pub rows_padded: u64,
    pub rows_truncated: u64,
    pub rows_merged: u64,
    /// One entry per header column, in header order.
    pub columns: Vec<ColumnStats>,
    /// Header names that appear more than once.
    pub duplicate_columns: Vec<String>,
}

impl RunStats {
    /// Total fallbacks across all columns.
    pub fn total_fallbacks(&self) -> u64 {
        self.columns.iter().map(|column| column.fallbacks).sum()
    }

    /// Total changed cells across all columns.
    pub fn total_changed(&self) -> u64 {
        self.columns.iter().map(|column| column.changed).sum()
    }

    fn record_reconciliation(&mut self, action: Reconciliation) {
        match action {
            Reconciliation::Unchanged => {}
            Reconciliation::Padded { .. } => self.rows_padded += 1,
            Reconciliation::Truncated { .. } => self.rows_truncated += 1,
            Reconciliation::Merged { .. } => self.rows_merged += 1,
        }
    }
}

/// Outcome of a file-level run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Path written, `None` for a dry run.
    pub output_path: Option<PathBuf>,
    pub stats: RunStats,
}

/// A header column bound to its normalizer.
struct BoundColumn<'p> {
    name: String,
    normalizer: &'p dyn FieldNormalizer,
}

/// Normalizes `input` into `target`.
///
/// The input is opened (and its encoding checked) before any output exists.
/// File output is only moved into place after the last row is written, so a
/// failed run leaves no output file.
pub fn normalize_file(
    input: &Path,
    target: &OutputTarget,
    policy: &ColumnPolicy,
    options: &PipelineOptions,
) -> Result<RunOutput> {
    let mut reader = TableReader::from_path(input)?;

    match target {
        OutputTarget::File(path) => {
            let file = AtomicFile::create(path)?;
            let mut writer = TableWriter::from_writer(file, path.display().to_string());
            let stats = normalize_table(&mut reader, &mut writer, policy, options)?;
            let output_path = writer.into_inner()?.commit()?;
            info!(output = %output_path.display(), "Output written");
            Ok(RunOutput {
                output_path: Some(output_path),
                stats,
            })
        }
        OutputTarget::Discard => {
            let mut writer = TableWriter::from_writer(io::sink(), "dry run");
            let stats = normalize_table(&mut reader, &mut writer, policy, options)?;
            writer.flush()?;
            info!("Dry run finished, output discarded");
            Ok(RunOutput {
                output_path: None,
                stats,
            })
        }
    }
}

/// Streams every record from `reader` to `writer`, normalizing as it goes.
///
/// # Errors
///
/// - [`PipelineError::EmptyInput`] if there is no header record
/// - [`PipelineError::Row`] for an over-length row under
///   [`OverflowPolicy::Reject`]
/// - ingest and output errors
pub fn normalize_table<R: Read, W: Write>(
    reader: &mut TableReader<R>,
    writer: &mut TableWriter<W>,
    policy: &ColumnPolicy,
    options: &PipelineOptions,
) -> Result<RunStats> {
    let span = info_span!("normalize", source = %reader.source_name());
    let _guard = span.enter();

    let header = reader.read_header()?;
    let mut stats = RunStats {
        source_name: reader.source_name().to_string(),
        ..RunStats::default()
    };

    let columns = bind_columns(&header, policy, &mut stats);
    writer.write_record(header.iter())?;
    info!(columns = header.len(), "Header written");

    let reconciler = RowReconciler::new(header.len(), options.overflow);
    for record in reader.records() {
        let RawRecord { line, fields } = record?;
        stats.rows_read += 1;

        let actual = fields.len();
        let reconciled = reconciler
            .reconcile(fields)
            .map_err(|source| PipelineError::Row { line, source })?;
        if reconciled.action != Reconciliation::Unchanged {
            debug!(
                line,
                fields = actual,
                expected = header.len(),
                action = ?reconciled.action,
                "Reconciled row shape"
            );
        }
        stats.record_reconciliation(reconciled.action);

        let row = normalize_row(line, &columns, reconciled.fields, &mut stats);
        writer.write_record(&row)?;
        stats.rows_written += 1;
    }

    info!(
        rows = stats.rows_written,
        padded = stats.rows_padded,
        truncated = stats.rows_truncated,
        merged = stats.rows_merged,
        fallbacks = stats.total_fallbacks(),
        "Normalization complete"
    );
    Ok(stats)
}

fn bind_columns<'p>(
    header: &TableHeader,
    policy: &'p ColumnPolicy,
    stats: &mut RunStats,
) -> Vec<BoundColumn<'p>> {
    for name in header.duplicates() {
        warn!(column = name, "Duplicate column name in header");
        stats.duplicate_columns.push(name.to_string());
    }

    for (name, _) in policy.entries() {
        if header.index_of(name).is_none() {
            debug!(column = name, "Policy column not present in header");
        }
    }

    header
        .iter()
        .map(|name| {
            let normalizer = policy.get(name);
            stats.columns.push(ColumnStats {
                name: name.clone(),
                normalizer: normalizer.name(),
                has_rule: policy.contains(name),
                changed: 0,
                fallbacks: 0,
            });
            BoundColumn {
                name: name.clone(),
                normalizer,
            }
        })
        .collect()
}

fn normalize_row(
    line: u64,
    columns: &[BoundColumn<'_>],
    fields: Vec<String>,
    stats: &mut RunStats,
) -> Vec<String> {
    columns
        .iter()
        .zip(fields)
        .zip(stats.columns.iter_mut())
        .map(|((column, raw), column_stats)| {
            let outcome = apply_normalizer(column.normalizer, &raw);
            if let CellOutcome::Fallback { reason, .. } = &outcome {
                column_stats.fallbacks += 1;
                debug!(
                    line,
                    column = %column.name,
                    normalizer = column.normalizer.name(),
                    reason = %reason,
                    "Normalizer failed, keeping trimmed value"
                );
            }
            if outcome.value() != raw {
                column_stats.changed += 1;
            }
            trace!(
                line,
                column = %column.name,
                raw = redact_value(&raw),
                value = redact_value(outcome.value()),
                "Normalized cell"
            );
            outcome.into_value()
        })
        .collect()
}
