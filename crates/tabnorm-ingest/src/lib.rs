//! Tabular data ingestion.
//!
//! Reads a delimited text source one record at a time: the first record is
//! the header, every following row (blank lines included) is handed out as
//! raw fields with its row number.
//!
//! # Features
//!
//! - **Header reading**: trimmed column names, BOM stripping, name lookup
//! - **Streaming records**: no buffering of the whole table
//! - **Encoding checks**: UTF-16 input is rejected up front
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabnorm_ingest::TableReader;
//!
//! let mut reader = TableReader::from_path(Path::new("Ojala.csv"))?;
//! let header = reader.read_header()?;
//! for record in reader.records() {
//!     let record = record?;
//!     println!("line {}: {} fields", record.line, record.fields.len());
//! }
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    RawRecord, Records, TableHeader, TableReader, normalize_header, validate_encoding,
};
