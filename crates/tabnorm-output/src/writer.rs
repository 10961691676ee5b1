//! CSV record writer.
//!
//! Comma delimited with `\r\n` record terminators. Fields are quoted only
//! when they contain the delimiter, a quote or a line break. All records must
//! have the same number of fields.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{OutputError, Result};

/// Streaming CSV writer over any byte sink.
pub struct TableWriter<W: Write> {
    inner: csv::Writer<W>,
    target_name: String,
    records_written: u64,
}

impl<W: Write> TableWriter<W> {
    /// Wraps a byte sink. `target_name` is used in errors and logs.
    pub fn from_writer(writer: W, target_name: impl Into<String>) -> Self {
        let inner = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(writer);
        Self {
            inner,
            target_name: target_name.into(),
            records_written: 0,
        }
    }

    /// Name of the underlying sink.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Number of records written so far, header included.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Writes one record.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, or if the record's field count differs from the
    /// first record written.
    pub fn write_record<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut fields = fields.into_iter().peekable();
        if fields.peek().is_none() {
            self.write_bare_terminator()?;
        } else {
            self.inner
                .write_record(fields)
                .map_err(|source| OutputError::CsvWrite {
                    target_name: self.target_name.clone(),
                    source,
                })?;
        }
        self.records_written += 1;
        Ok(())
    }

    // `csv` writes `""` for a record with no fields; a row without fields is
    // an empty line.
    fn write_bare_terminator(&mut self) -> Result<()> {
        self.flush()?;
        self.inner
            .get_mut()
            .write_all(b"\r\n")
            .map_err(|source| OutputError::Io {
                operation: "write",
                path: self.target_name.clone().into(),
                source,
            })
    }

    /// Flushes buffered records to the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|source| OutputError::Io {
            operation: "flush",
            path: self.target_name.clone().into(),
            source,
        })
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        let target_name = self.target_name;
        self.inner.into_inner().map_err(|err| OutputError::Io {
            operation: "flush",
            path: target_name.into(),
            source: err.into_error(),
        })
    }
}
