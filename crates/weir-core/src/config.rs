//! Shared JSON configuration plumbing.
//!
//! Every boundary crate (buffer, cluster, planner) loads its
//! parameters from a JSON document and reports the same taxonomy of
//! failures: missing file, unreadable file, malformed JSON, missing
//! field, wrongly-typed field. The helpers here do the document walk
//! so each loader only states which fields it wants.
//!
//! Field paths are dotted, e.g. `buffer.hot.total_capacity`; errors
//! name the full path so a harness can tell which part of a nested
//! document was wrong.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::error::ConfigError;

/// Read a configuration file to a string.
///
/// # Errors
///
/// [`ConfigError::NotFound`] if the file does not exist;
/// [`ConfigError::Io`] for any other read failure.
pub fn read_text(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io(e)
        }
    })
}

/// Parse a configuration string into a JSON document.
///
/// # Errors
///
/// [`ConfigError::Parse`] with the parser's description if the text
/// is not valid JSON.
pub fn parse_document(text: &str) -> Result<Value, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::Parse {
        detail: e.to_string(),
    })
}

/// Read and parse a configuration file in one step.
///
/// # Errors
///
/// Any of [`ConfigError::NotFound`], [`ConfigError::Io`],
/// [`ConfigError::Parse`].
pub fn load_document(path: &Path) -> Result<Value, ConfigError> {
    parse_document(&read_text(path)?)
}

/// Walk a dotted field path into a document.
///
/// # Errors
///
/// [`ConfigError::MissingField`] naming the first absent segment;
/// [`ConfigError::InvalidField`] if a non-final segment is not an
/// object.
pub fn require<'a>(doc: &'a Value, field: &str) -> Result<&'a Value, ConfigError> {
    let mut current = doc;
    let mut walked = String::new();
    for segment in field.split('.') {
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(segment);
        let obj = current.as_object().ok_or_else(|| ConfigError::InvalidField {
            field: parent_of(&walked).to_string(),
            expected: "an object",
        })?;
        current = obj.get(segment).ok_or_else(|| ConfigError::MissingField {
            field: walked.clone(),
        })?;
    }
    Ok(current)
}

/// Fetch a field as an unsigned integer.
///
/// # Errors
///
/// The walk errors of [`require`], plus [`ConfigError::InvalidField`]
/// when the field is present but not a non-negative integer.
pub fn require_u64(doc: &Value, field: &str) -> Result<u64, ConfigError> {
    require(doc, field)?
        .as_u64()
        .ok_or_else(|| ConfigError::InvalidField {
            field: field.to_string(),
            expected: "a non-negative integer",
        })
}

/// Fetch a field as a string slice.
///
/// # Errors
///
/// The walk errors of [`require`], plus [`ConfigError::InvalidField`]
/// when the field is present but not a string.
pub fn require_str<'a>(doc: &'a Value, field: &str) -> Result<&'a str, ConfigError> {
    require(doc, field)?
        .as_str()
        .ok_or_else(|| ConfigError::InvalidField {
            field: field.to_string(),
            expected: "a string",
        })
}

/// Fetch a field as an array.
///
/// # Errors
///
/// The walk errors of [`require`], plus [`ConfigError::InvalidField`]
/// when the field is present but not an array.
pub fn require_array<'a>(doc: &'a Value, field: &str) -> Result<&'a Vec<Value>, ConfigError> {
    require(doc, field)?
        .as_array()
        .ok_or_else(|| ConfigError::InvalidField {
            field: field.to_string(),
            expected: "an array",
        })
}

/// The dotted path with its last segment removed.
fn parent_of(walked: &str) -> &str {
    match walked.rfind('.') {
        Some(idx) => &walked[..idx],
        None => walked,
    }
}
