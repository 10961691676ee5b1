//! Record-at-a-time CSV reading.
//!
//! The first row is the header; every later row is returned as raw fields
//! with its row number. Rows may have any number of fields; shape
//! reconciliation is the caller's concern. A blank line is a row with no
//! fields, wherever it appears.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{IngestError, Result};

use super::blank_lines::BlankLineTracker;
use super::header::TableHeader;

/// One data row as read from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based row number. The header is row 1, every blank line counts as
    /// a row and a quoted multiline value does not add rows.
    pub line: u64,
    /// Fields exactly as read, untrimmed. Empty for a blank line.
    pub fields: Vec<String>,
}

/// Streaming CSV reader over any byte source.
pub struct TableReader<R> {
    inner: csv::Reader<BlankLineTracker<R>>,
    source_name: String,
    record: StringRecord,
    /// Blank rows to hand out before `held`.
    blank_rows: u64,
    held: Option<Vec<String>>,
    exhausted: bool,
    rows: u64,
}

impl TableReader<File> {
    /// Opens a CSV file after checking its encoding.
    pub fn from_path(path: &Path) -> Result<Self> {
        validate_encoding(path)?;
        let file = open_file(path)?;
        Ok(Self::from_reader(file, path.display().to_string()))
    }
}

impl<R: Read> TableReader<R> {
    /// Wraps a byte source. `source_name` is used in errors and logs.
    pub fn from_reader(reader: R, source_name: impl Into<String>) -> Self {
        let inner = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BlankLineTracker::new(reader));
        Self {
            inner,
            source_name: source_name.into(),
            record: StringRecord::new(),
            blank_rows: 0,
            held: None,
            exhausted: false,
            rows: 0,
        }
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Reads the first row as the header.
    ///
    /// A source that starts with a blank line has a header with no columns.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::EmptyInput`] if the source has no rows at all.
    pub fn read_header(&mut self) -> Result<TableHeader> {
        let Some(fields) = self.next_row()? else {
            return Err(IngestError::EmptyInput {
                source_name: self.source_name.clone(),
            });
        };
        let header = TableHeader::new(fields);
        tracing::debug!(
            source = %self.source_name,
            columns = header.len(),
            "Read header record"
        );
        Ok(header)
    }

    /// Reads the next data row, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<RawRecord>> {
        Ok(self.next_row()?.map(|fields| RawRecord {
            line: self.rows,
            fields,
        }))
    }

    /// Iterates over the remaining data records.
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }

    fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        if self.blank_rows == 0 && self.held.is_none() && !self.exhausted {
            if self.read_next()? {
                self.blank_rows = self.inner.get_mut().take_before_record();
                self.held = Some(self.record.iter().map(str::to_string).collect());
            } else {
                self.blank_rows = self.inner.get_mut().take_trailing();
                self.exhausted = true;
            }
        }

        let row = if self.blank_rows > 0 {
            self.blank_rows -= 1;
            Vec::new()
        } else if let Some(fields) = self.held.take() {
            fields
        } else {
            return Ok(None);
        };
        self.rows += 1;
        Ok(Some(row))
    }

    fn read_next(&mut self) -> Result<bool> {
        self.inner
            .read_record(&mut self.record)
            .map_err(|source| IngestError::CsvParse {
                source_name: self.source_name.clone(),
                source,
            })
    }
}

/// Iterator over data records, see [`TableReader::records`].
pub struct Records<'a, R> {
    reader: &'a mut TableReader<R>,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_record().transpose()
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported. A UTF-8 BOM is
/// accepted and stripped from the header.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open_file(path)?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn reader(content: &str) -> TableReader<&[u8]> {
        TableReader::from_reader(content.as_bytes(), "inline")
    }

    #[test]
    fn test_read_header_and_records() {
        let mut reader = reader("A, B ,C\n1,2,3\n4,5\n");
        let header = reader.read_header().unwrap();
        assert_eq!(header.columns(), ["A", "B", "C"]);

        let records: Vec<RawRecord> = reader.records().collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[0].fields, vec!["1", "2", "3"]);
        assert_eq!(records[1].fields, vec!["4", "5"]);
    }

    #[test]
    fn test_fields_are_not_trimmed() {
        let mut reader = reader("A\n  x  \n");
        reader.read_header().unwrap();
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.fields, vec!["  x  "]);
    }

    #[test]
    fn test_quoted_fields() {
        let mut reader = reader("A,B\n\"hello, world\",\"he said \"\"hi\"\"\"\n");
        reader.read_header().unwrap();
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.fields, vec!["hello, world", "he said \"hi\""]);
    }

    #[test]
    fn test_multiline_field() {
        let mut reader = reader("A,B\n\"line one\nline two\",x\ny,z\n");
        reader.read_header().unwrap();
        let first = reader.next_record().unwrap().unwrap();
        let second = reader.next_record().unwrap().unwrap();
        assert_eq!(first.line, 2);
        assert_eq!(first.fields, vec!["line one\nline two", "x"]);
        assert_eq!(second.line, 3);
        assert_eq!(second.fields, vec!["y", "z"]);
    }

    #[test]
    fn test_blank_lines_are_empty_rows() {
        let mut reader = reader("A,B\n1,2\n\n3,4\n\n");
        reader.read_header().unwrap();
        let records: Vec<RawRecord> = reader.records().collect::<Result<_>>().unwrap();

        let rows: Vec<(u64, usize)> = records
            .iter()
            .map(|record| (record.line, record.fields.len()))
            .collect();
        assert_eq!(rows, vec![(2, 2), (3, 0), (4, 2), (5, 0)]);
    }

    #[test]
    fn test_blank_lines_with_crlf() {
        let mut reader = reader("A\r\n1\r\n\r\n2\r\n");
        reader.read_header().unwrap();
        let rows: Vec<Vec<String>> = reader.records().map(|r| r.unwrap().fields).collect();
        assert_eq!(rows, vec![vec!["1".to_string()], vec![], vec!["2".to_string()]]);
    }

    #[test]
    fn test_leading_blank_line_is_an_empty_header() {
        let mut reader = reader("\nA,B\n");
        let header = reader.read_header().unwrap();
        assert!(header.is_empty());
        let record = reader.next_record().unwrap().unwrap();
        assert_eq!(record.line, 2);
        assert_eq!(record.fields, vec!["A", "B"]);
    }

    #[test]
    fn test_only_blank_lines() {
        let mut reader = reader("\n\n");
        assert!(reader.read_header().unwrap().is_empty());
        let record = reader.next_record().unwrap().unwrap();
        assert!(record.fields.is_empty());
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_empty_input() {
        let mut reader = reader("");
        let result = reader.read_header();
        assert!(matches!(result, Err(IngestError::EmptyInput { .. })));
    }

    #[test]
    fn test_header_only() {
        let mut reader = reader("A,B\n");
        reader.read_header().unwrap();
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_from_path_with_bom() {
        let file = create_temp_csv("\u{feff}FECHA,YT\n05/03/2024,Sí\n".as_bytes());
        let mut reader = TableReader::from_path(file.path()).unwrap();
        let header = reader.read_header().unwrap();
        assert_eq!(header.columns(), ["FECHA", "YT"]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TableReader::from_path(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'A', 0x00]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let mut reader = TableReader::from_reader(&b"A\n\xff\xfe\xfd\n"[..], "inline");
        reader.read_header().unwrap();
        assert!(matches!(
            reader.next_record(),
            Err(IngestError::CsvParse { .. })
        ));
    }
}
