//! Trace playback reader.
//!
//! [`TraceReader`] reads rows from any `BufRead` source. The header
//! line is validated on construction.

use std::io::BufRead;

use serde_json::Value;

use weir_core::{config, Tick};

use crate::error::TraceError;
use crate::types::{TraceHeader, TraceRow};
use crate::{FORMAT_NAME, FORMAT_VERSION};

/// Reads trace data from a byte stream.
///
/// Generic over `R: BufRead` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
#[derive(Debug)]
pub struct TraceReader<R: BufRead> {
    reader: R,
    header: TraceHeader,
    line: u64,
    rows_read: u64,
}

impl<R: BufRead> TraceReader<R> {
    /// Open a trace stream, reading and validating the header line.
    ///
    /// # Errors
    ///
    /// [`TraceError::InvalidHeader`] for an empty stream, a first line
    /// that is not a header, or missing header fields;
    /// [`TraceError::UnsupportedVersion`] when the header names a
    /// format version this build cannot read.
    pub fn open(mut reader: R) -> Result<Self, TraceError> {
        let mut first = String::new();
        if reader.read_line(&mut first)? == 0 {
            return Err(TraceError::InvalidHeader {
                detail: "empty stream".to_string(),
            });
        }
        let doc: Value =
            serde_json::from_str(first.trim_end()).map_err(|e| TraceError::InvalidHeader {
                detail: e.to_string(),
            })?;

        let format = header_str(&doc, "format")?;
        if format != FORMAT_NAME {
            return Err(TraceError::InvalidHeader {
                detail: format!("format is '{format}', expected '{FORMAT_NAME}'"),
            });
        }
        let version = header_u64(&doc, "version")?;
        if version != u64::from(FORMAT_VERSION) {
            return Err(TraceError::UnsupportedVersion { found: version });
        }

        let header = TraceHeader {
            hot_capacity: header_u64(&doc, "hot_capacity")?,
            hot_rate: header_u64(&doc, "hot_rate")?,
            cold_capacity: header_u64(&doc, "cold_capacity")?,
            cold_rate: header_u64(&doc, "cold_rate")?,
        };
        Ok(Self {
            reader,
            header,
            line: 1,
            rows_read: 0,
        })
    }

    /// Buffer geometry from the trace header.
    pub fn header(&self) -> &TraceHeader {
        &self.header
    }

    /// Read the next row, or `None` if the stream is exhausted.
    ///
    /// # Errors
    ///
    /// [`TraceError::Io`] on a read failure;
    /// [`TraceError::MalformedRow`] naming the offending line when a
    /// row does not decode.
    pub fn next_row(&mut self) -> Result<Option<TraceRow>, TraceError> {
        let mut text = String::new();
        loop {
            text.clear();
            if self.reader.read_line(&mut text)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            // Tolerate blank lines.
            if !text.trim().is_empty() {
                break;
            }
        }
        let row = parse_row(text.trim_end(), self.line)?;
        self.rows_read += 1;
        Ok(Some(row))
    }

    /// Number of rows read so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Convert into a row iterator.
    pub fn rows(self) -> RowIter<R> {
        RowIter {
            reader: self,
            done: false,
        }
    }
}

/// Iterator adapter over trace rows.
pub struct RowIter<R: BufRead> {
    reader: TraceReader<R>,
    done: bool,
}

impl<R: BufRead> Iterator for RowIter<R> {
    type Item = Result<TraceRow, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn header_u64(doc: &Value, field: &str) -> Result<u64, TraceError> {
    config::require_u64(doc, field).map_err(|e| TraceError::InvalidHeader {
        detail: e.to_string(),
    })
}

fn header_str<'a>(doc: &'a Value, field: &str) -> Result<&'a str, TraceError> {
    config::require_str(doc, field).map_err(|e| TraceError::InvalidHeader {
        detail: e.to_string(),
    })
}

fn parse_row(text: &str, line: u64) -> Result<TraceRow, TraceError> {
    let doc: Value = serde_json::from_str(text).map_err(|e| TraceError::MalformedRow {
        line,
        detail: e.to_string(),
    })?;
    let read = |field: &str| {
        config::require_u64(&doc, field).map_err(|e| TraceError::MalformedRow {
            line,
            detail: e.to_string(),
        })
    };
    Ok(TraceRow {
        tick: Tick(read("tick")?),
        hot: read("hot")?,
        cold: read("cold")?,
        queued: read("queued")? as usize,
        live: read("live")? as usize,
    })
}
