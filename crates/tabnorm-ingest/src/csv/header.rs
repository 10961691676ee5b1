//! Header record normalization and column lookup.

use std::collections::HashMap;

/// The trimmed header record of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    /// Column names in input order (trimmed).
    columns: Vec<String>,
    /// Column name to position. Duplicate names map to their last position.
    index: HashMap<String, usize>,
}

impl TableHeader {
    /// Builds a header from raw header fields, trimming every name.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = fields
            .into_iter()
            .map(|field| normalize_header(field.as_ref()))
            .collect();
        let index = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Self { columns, index }
    }

    /// Column names in input order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column. For duplicated names this is the last position.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Column names that appear more than once, in first-seen order.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for name in &self.columns {
            let count = seen.entry(name.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(name.as_str());
            }
        }
        duplicates
    }

    /// Iterates over column names.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a TableHeader {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Normalizes a header value: strips a UTF-8 BOM and surrounding whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_matches('\u{feff}').trim().to_string()
}
