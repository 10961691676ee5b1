//! Output generation for normalized tables.
//!
//! - [`TableWriter`]: comma-delimited CSV with minimal quoting
//! - [`AtomicFile`]: temp file plus rename, so consumers never observe a
//!   partially written output

mod atomic;
mod error;
mod writer;

pub use atomic::AtomicFile;
pub use error::{OutputError, Result};
pub use writer::TableWriter;

/// Path of the default output file for `input`: `<stem>_normalized.csv` in
/// the same directory.
pub fn default_output_path(input: &std::path::Path) -> std::path::PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_normalized.csv"))
}
