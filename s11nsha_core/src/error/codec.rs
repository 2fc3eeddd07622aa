//! Snapshot decoding error types

use crate::codec::SnapshotEncoding;
use thiserror::Error;

/// Errors raised while decoding a hasher snapshot
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input ended before (or continued after) the fixed-width layout
    #[error("Truncated {encoding} snapshot: expected {expected} bytes, got {actual}")]
    Truncated {
        encoding: SnapshotEncoding,
        expected: usize,
        actual: usize,
    },

    /// Input carries the tag of the other encoding
    #[error("Snapshot encoding mismatch: expected {expected}, found {found}")]
    EncodingMismatch {
        expected: SnapshotEncoding,
        found: SnapshotEncoding,
    },

    /// Input carries no recognizable snapshot tag
    #[error("Not a {encoding} snapshot: missing format tag")]
    MissingTag { encoding: SnapshotEncoding },

    /// Snapshot was written by an unknown format version
    #[error("Unsupported {encoding} snapshot version {version}")]
    UnsupportedVersion {
        encoding: SnapshotEncoding,
        version: u32,
    },

    /// A field has the wrong width or an invalid value
    #[error("Malformed snapshot field '{field}': {reason}")]
    MalformedField { field: String, reason: String },

    /// Text snapshot is not valid JSON for the expected document shape
    #[error("Malformed text snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Create a truncated input error
    pub fn truncated(encoding: SnapshotEncoding, expected: usize, actual: usize) -> Self {
        Self::Truncated {
            encoding,
            expected,
            actual,
        }
    }

    /// Create an encoding mismatch error
    pub fn encoding_mismatch(expected: SnapshotEncoding, found: SnapshotEncoding) -> Self {
        Self::EncodingMismatch { expected, found }
    }

    /// Create a malformed field error
    pub fn malformed_field(field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
