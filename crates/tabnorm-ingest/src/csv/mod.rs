//! CSV reading utilities.

mod blank_lines;
mod header;
mod reader;

pub use header::{TableHeader, normalize_header};
pub use reader::{RawRecord, Records, TableReader, validate_encoding};
