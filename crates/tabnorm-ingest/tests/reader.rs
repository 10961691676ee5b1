//! Integration tests for reading tables from disk.

use std::io::Write;

use tabnorm_ingest::{IngestError, RawRecord, TableReader};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn reads_ragged_rows_without_reshaping() {
    let file = create_temp_csv("FECHA,YT,VERSION\n05/03/2024\n01/01/2024,si,V2,extra\n");
    let mut reader = TableReader::from_path(file.path()).unwrap();

    let header = reader.read_header().unwrap();
    let records: Vec<RawRecord> = reader.records().map(Result::unwrap).collect();

    assert_eq!(header.len(), 3);
    assert_eq!(records[0].fields.len(), 1);
    assert_eq!(records[1].fields.len(), 4);
}

#[test]
fn blank_lines_become_empty_rows() {
    let file = create_temp_csv("A,VERSION\n1,x\n\n2,y\n");
    let mut reader = TableReader::from_path(file.path()).unwrap();
    reader.read_header().unwrap();

    let rows: Vec<Vec<String>> = reader.records().map(|r| r.unwrap().fields).collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], ["1", "x"]);
    assert!(rows[1].is_empty());
    assert_eq!(rows[2], ["2", "y"]);
}

#[test]
fn file_of_blank_lines_is_not_empty() {
    let file = create_temp_csv("\n\n");
    let mut reader = TableReader::from_path(file.path()).unwrap();

    let header = reader.read_header().unwrap();
    let rows: Vec<RawRecord> = reader.records().map(Result::unwrap).collect();

    assert!(header.is_empty());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].line, 2);
}

#[test]
fn empty_file_has_no_header() {
    let file = create_temp_csv("");
    let mut reader = TableReader::from_path(file.path()).unwrap();

    let err = reader.read_header().unwrap_err();

    assert!(matches!(err, IngestError::EmptyInput { .. }));
    assert!(err.to_string().starts_with("input is empty"));
}

#[test]
fn source_name_is_the_path() {
    let file = create_temp_csv("A\n");
    let reader = TableReader::from_path(file.path()).unwrap();

    assert_eq!(reader.source_name(), file.path().display().to_string());
}
