//! Snapshot codec for in-progress hasher state
//!
//! A snapshot is an independent copy of `{byte_count, words, block_buffer}`
//! that can be restored into a fresh [`Sha1Hasher`] to continue hashing
//! exactly where the original left off.
//!
//! Two encodings are available:
//! - [`SnapshotEncoding::Text`]: a JSON document, portable across hosts.
//! - [`SnapshotEncoding::Compact`]: a 96-byte positional dump in host byte
//!   order. Only valid on hosts with the same endianness.
//!
//! Both carry an explicit encoding tag, so decoding with the wrong encoding
//! fails with [`CodecError::EncodingMismatch`] instead of producing a
//! bogus state.

use crate::error::{CodecError, ValidationError};
use crate::hashing::{HasherState, Sha1Hasher};
use crate::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

mod compact;
mod text;

/// Wire format of a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotEncoding {
    /// Human-readable, portable JSON document
    #[default]
    Text,
    /// Fixed-width native-endian dump
    Compact,
}

impl fmt::Display for SnapshotEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotEncoding::Text => write!(f, "text"),
            SnapshotEncoding::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for SnapshotEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SnapshotEncoding::Text),
            "compact" | "binary" => Ok(SnapshotEncoding::Compact),
            _ => Err(ValidationError::invalid_parameter(
                "encoding",
                &format!("unknown snapshot encoding '{s}'"),
            )
            .into()),
        }
    }
}

/// Serialize `state` with the chosen encoding
pub fn marshal(state: &HasherState, encoding: SnapshotEncoding) -> Vec<u8> {
    let encoded = match encoding {
        SnapshotEncoding::Text => text::encode(state),
        SnapshotEncoding::Compact => compact::encode(state),
    };
    debug!(
        "Marshalled {encoding} snapshot at byte {} ({} bytes)",
        state.byte_count(),
        encoded.len()
    );
    encoded
}

/// Serialize the state of a hasher with the chosen encoding
pub fn marshal_hasher(hasher: &Sha1Hasher, encoding: SnapshotEncoding) -> Vec<u8> {
    marshal(hasher.state(), encoding)
}

/// Decode a snapshot produced by [`marshal`] with the same encoding
pub fn unmarshal(input: &[u8], encoding: SnapshotEncoding) -> Result<HasherState> {
    let state = match encoding {
        SnapshotEncoding::Text => text::decode(input),
        SnapshotEncoding::Compact => compact::decode(input),
    }
    .inspect_err(|e| debug!("Failed to unmarshal {encoding} snapshot: {e}"))?;

    debug!(
        "Unmarshalled {encoding} snapshot at byte {}",
        state.byte_count()
    );
    Ok(state)
}

/// Decode a snapshot into an existing hasher.
///
/// On error the hasher is left untouched.
pub fn unmarshal_into(
    hasher: &mut Sha1Hasher,
    input: &[u8],
    encoding: SnapshotEncoding,
) -> Result<()> {
    let state = unmarshal(input, encoding)?;
    hasher.restore(state);
    Ok(())
}

/// Identify the encoding of a snapshot from its tag, if it carries one
pub fn detect(input: &[u8]) -> Option<SnapshotEncoding> {
    if compact::has_tag(input) {
        Some(SnapshotEncoding::Compact)
    } else if text::has_tag(input) {
        Some(SnapshotEncoding::Text)
    } else {
        None
    }
}

fn mismatch(expected: SnapshotEncoding, found: SnapshotEncoding) -> Error {
    CodecError::encoding_mismatch(expected, found).into()
}
