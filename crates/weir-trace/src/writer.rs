//! Trace recording writer.
//!
//! [`TraceWriter`] streams rows to any `Write` sink, one JSON object
//! per line. The header line is written immediately on construction.

use std::io::Write;

use crate::error::TraceError;
use crate::types::{TraceHeader, TraceRow};
use crate::{FORMAT_NAME, FORMAT_VERSION};

/// Writes trace data to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use weir_core::Tick;
/// use weir_trace::{TraceHeader, TraceReader, TraceRow, TraceWriter};
///
/// let header = TraceHeader {
///     hot_capacity: 500,
///     hot_rate: 5,
///     cold_capacity: 250,
///     cold_rate: 2,
/// };
///
/// // Record two ticks to an in-memory buffer.
/// let mut writer = TraceWriter::new(Vec::new(), &header).unwrap();
/// for tick in 0..2u64 {
///     let row = TraceRow {
///         tick: Tick(tick),
///         hot: 500 - 2 * (tick + 1),
///         cold: 250,
///         queued: 0,
///         live: 1,
///     };
///     writer.write_row(&row).unwrap();
/// }
/// assert_eq!(writer.rows_written(), 2);
/// let buf = writer.into_inner();
///
/// // Read them back.
/// let mut reader = TraceReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.header(), &header);
/// assert_eq!(reader.next_row().unwrap().unwrap().tick, Tick(0));
/// assert_eq!(reader.next_row().unwrap().unwrap().hot, 496);
/// assert!(reader.next_row().unwrap().is_none());
/// ```
pub struct TraceWriter<W: Write> {
    writer: W,
    rows_written: u64,
}

impl<W: Write> TraceWriter<W> {
    /// Create a trace writer, immediately writing the header line.
    ///
    /// # Errors
    ///
    /// [`TraceError::Io`] if the header cannot be written.
    pub fn new(mut writer: W, header: &TraceHeader) -> Result<Self, TraceError> {
        let line = serde_json::json!({
            "format": FORMAT_NAME,
            "version": FORMAT_VERSION,
            "hot_capacity": header.hot_capacity,
            "hot_rate": header.hot_rate,
            "cold_capacity": header.cold_capacity,
            "cold_rate": header.cold_rate,
        });
        writeln!(writer, "{line}")?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Record one row.
    ///
    /// # Errors
    ///
    /// [`TraceError::Io`] if the row cannot be written.
    pub fn write_row(&mut self, row: &TraceRow) -> Result<(), TraceError> {
        let line = serde_json::json!({
            "tick": row.tick.0,
            "hot": row.hot,
            "cold": row.cold,
            "queued": row.queued,
            "live": row.live,
        });
        writeln!(self.writer, "{line}")?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    ///
    /// [`TraceError::Io`] if the flush fails.
    pub fn flush(&mut self) -> Result<(), TraceError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
