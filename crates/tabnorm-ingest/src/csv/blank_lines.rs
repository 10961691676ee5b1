//! Tracking of blank lines the CSV parser skips.
//!
//! The `csv` crate silently drops empty lines between records. A table with
//! a blank line still has a row there (it just has no fields), so
//! [`BlankLineTracker`] watches the bytes on their way into the parser and
//! remembers how many blank lines precede each record. Quoted fields are
//! followed so an empty line inside a quoted value is not counted.

use std::collections::VecDeque;
use std::io::{self, Read};
use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// At the start of a line, outside any record.
    LineStart,
    /// Just after a `\r` terminator; a following `\n` belongs to it.
    AfterCr,
    FieldStart,
    Unquoted,
    Quoted,
    /// A `"` inside a quoted field: either an escape or the closing quote.
    QuoteInQuoted,
}

/// Byte source adapter that counts blank lines between records.
#[derive(Debug)]
pub(crate) struct BlankLineTracker<R> {
    inner: R,
    state: Scan,
    pending: u64,
    before_record: VecDeque<u64>,
}

impl<R> BlankLineTracker<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            state: Scan::LineStart,
            pending: 0,
            before_record: VecDeque::new(),
        }
    }

    /// Blank lines seen before the next record the parser hands out.
    pub(crate) fn take_before_record(&mut self) -> u64 {
        self.before_record.pop_front().unwrap_or(0)
    }

    /// Blank lines after the last record. Only complete once the source is
    /// exhausted.
    pub(crate) fn take_trailing(&mut self) -> u64 {
        mem::take(&mut self.pending)
    }

    fn scan(&mut self, byte: u8) {
        let state = self.state;
        self.state = match state {
            Scan::LineStart => self.line_start(byte),
            Scan::AfterCr if byte == b'\n' => Scan::LineStart,
            Scan::AfterCr => self.line_start(byte),
            Scan::FieldStart => field_start(byte),
            Scan::Unquoted => match byte {
                b',' => Scan::FieldStart,
                b'\n' => Scan::LineStart,
                b'\r' => Scan::AfterCr,
                _ => Scan::Unquoted,
            },
            Scan::Quoted if byte == b'"' => Scan::QuoteInQuoted,
            Scan::Quoted => Scan::Quoted,
            Scan::QuoteInQuoted => match byte {
                b'"' => Scan::Quoted,
                b',' => Scan::FieldStart,
                b'\n' => Scan::LineStart,
                b'\r' => Scan::AfterCr,
                _ => Scan::Unquoted,
            },
        };
    }

    fn line_start(&mut self, byte: u8) -> Scan {
        match byte {
            b'\n' => {
                self.pending += 1;
                Scan::LineStart
            }
            b'\r' => {
                self.pending += 1;
                Scan::AfterCr
            }
            _ => {
                self.before_record.push_back(mem::take(&mut self.pending));
                field_start(byte)
            }
        }
    }
}

fn field_start(byte: u8) -> Scan {
    match byte {
        b'"' => Scan::Quoted,
        b',' => Scan::FieldStart,
        b'\n' => Scan::LineStart,
        b'\r' => Scan::AfterCr,
        _ => Scan::Unquoted,
    }
}

impl<R: Read> Read for BlankLineTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        for &byte in &buf[..read] {
            self.scan(byte);
        }
        Ok(read)
    }
}
