//! Table normalization pipeline and logging for the `tabnorm` binary.
//!
//! [`pipeline::normalize_table`] works on any reader and writer;
//! [`pipeline::normalize_file`] adds file handling and atomic output.

pub mod logging;
pub mod pipeline;
