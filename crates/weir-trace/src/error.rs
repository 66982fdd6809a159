//! Error type for the trace system.

use std::fmt;
use std::io;

/// Errors that can occur while recording, reading, or verifying a
/// trace.
#[derive(Debug)]
pub enum TraceError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The stream does not begin with a recognizable header line.
    InvalidHeader {
        /// What was wrong with the first line.
        detail: String,
    },
    /// The header names a format version this build cannot read.
    UnsupportedVersion {
        /// The version found in the header.
        found: u64,
    },
    /// A row line could not be decoded.
    MalformedRow {
        /// One-based line number within the stream.
        line: u64,
        /// What was wrong with the row.
        detail: String,
    },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidHeader { detail } => {
                write!(f, "invalid trace header: {detail}")
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported trace format version {found}")
            }
            Self::MalformedRow { line, detail } => {
                write!(f, "malformed trace row at line {line}: {detail}")
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TraceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
