//! Portable JSON snapshot encoding

use super::{SnapshotEncoding, mismatch};
use crate::Result;
use crate::error::CodecError;
use crate::hashing::{BLOCK_SIZE, DIGEST_WORDS, HasherState, parse_hex_pair};
use serde::{Deserialize, Serialize};

const FORMAT_TAG: &str = "s11nsha";
const VERSION: u32 = 1;

/// On-wire layout: byte count as `[low, high]`, then the five words, then
/// the 64 buffer bytes as 128 lowercase hex characters.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TextSnapshot {
    format: String,
    encoding: SnapshotEncoding,
    version: u32,
    total: [u32; 2],
    state: [u32; DIGEST_WORDS],
    buffer: String,
}

/// Just enough of the document to recognize it
#[derive(Deserialize)]
struct TextTag {
    format: String,
    encoding: SnapshotEncoding,
}

pub(super) fn encode(state: &HasherState) -> Vec<u8> {
    let (low, high) = state.byte_count_halves();
    let buffer = state
        .block_buffer()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();

    let snapshot = TextSnapshot {
        format: FORMAT_TAG.to_string(),
        encoding: SnapshotEncoding::Text,
        version: VERSION,
        total: [low, high],
        state: *state.words(),
        buffer,
    };

    serde_json::to_vec(&snapshot).expect("Text snapshot holds only strings and integers")
}

pub(super) fn decode(input: &[u8]) -> Result<HasherState> {
    if super::compact::has_tag(input) {
        return Err(mismatch(SnapshotEncoding::Text, SnapshotEncoding::Compact));
    }

    let snapshot: TextSnapshot = serde_json::from_slice(input).map_err(CodecError::from)?;

    if snapshot.format != FORMAT_TAG {
        return Err(CodecError::MissingTag {
            encoding: SnapshotEncoding::Text,
        }
        .into());
    }
    if snapshot.encoding != SnapshotEncoding::Text {
        return Err(mismatch(SnapshotEncoding::Text, snapshot.encoding));
    }
    if snapshot.version != VERSION {
        return Err(CodecError::UnsupportedVersion {
            encoding: SnapshotEncoding::Text,
            version: snapshot.version,
        }
        .into());
    }

    let [low, high] = snapshot.total;
    let byte_count = (u64::from(high) << 32) | u64::from(low);

    Ok(HasherState::from_parts(
        byte_count,
        snapshot.state,
        decode_buffer(&snapshot.buffer)?,
    ))
}

pub(super) fn has_tag(input: &[u8]) -> bool {
    serde_json::from_slice::<TextTag>(input)
        .is_ok_and(|tag| tag.format == FORMAT_TAG && tag.encoding == SnapshotEncoding::Text)
}

fn decode_buffer(hex: &str) -> Result<[u8; BLOCK_SIZE]> {
    if hex.len() != BLOCK_SIZE * 2 {
        return Err(CodecError::malformed_field(
            "buffer",
            format!("expected {} hex characters, got {}", BLOCK_SIZE * 2, hex.len()),
        )
        .into());
    }

    let mut buffer = [0u8; BLOCK_SIZE];
    for (i, byte) in buffer.iter_mut().enumerate() {
        let pair = hex
            .get(i * 2..i * 2 + 2)
            .ok_or_else(|| CodecError::malformed_field("buffer", "non-ASCII character"))?;
        *byte = parse_hex_pair(pair).ok_or_else(|| {
            CodecError::malformed_field("buffer", format!("invalid hex pair '{pair}'"))
        })?;
    }
    Ok(buffer)
}
