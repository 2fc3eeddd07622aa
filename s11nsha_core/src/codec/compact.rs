//! Fixed-width native-endian snapshot encoding

use super::{SnapshotEncoding, mismatch};
use crate::Result;
use crate::error::CodecError;
use crate::hashing::{BLOCK_SIZE, DIGEST_WORDS, HasherState};
use bytes::{Buf, BufMut, BytesMut};

const MAGIC: [u8; 3] = *b"S1C";
const VERSION: u8 = 1;

/// Tag, two count halves, five words, block buffer
pub(super) const ENCODED_LEN: usize = MAGIC.len() + 1 + 2 * 4 + DIGEST_WORDS * 4 + BLOCK_SIZE;

pub(super) fn encode(state: &HasherState) -> Vec<u8> {
    let (low, high) = state.byte_count_halves();
    let mut out = BytesMut::with_capacity(ENCODED_LEN);

    out.put_slice(&MAGIC);
    out.put_u8(VERSION);
    out.put_u32_ne(low);
    out.put_u32_ne(high);
    for word in state.words() {
        out.put_u32_ne(*word);
    }
    out.put_slice(state.block_buffer());

    out.to_vec()
}

pub(super) fn decode(input: &[u8]) -> Result<HasherState> {
    if !has_tag(input) {
        if super::text::has_tag(input) {
            return Err(mismatch(SnapshotEncoding::Compact, SnapshotEncoding::Text));
        }
        return Err(CodecError::MissingTag {
            encoding: SnapshotEncoding::Compact,
        }
        .into());
    }
    if input.len() != ENCODED_LEN {
        return Err(CodecError::truncated(SnapshotEncoding::Compact, ENCODED_LEN, input.len()).into());
    }

    let mut buf = &input[MAGIC.len()..];
    let version = buf.get_u8();
    if version != VERSION {
        return Err(CodecError::UnsupportedVersion {
            encoding: SnapshotEncoding::Compact,
            version: u32::from(version),
        }
        .into());
    }

    let low = buf.get_u32_ne();
    let high = buf.get_u32_ne();
    let mut words = [0u32; DIGEST_WORDS];
    for word in &mut words {
        *word = buf.get_u32_ne();
    }
    let mut block_buffer = [0u8; BLOCK_SIZE];
    buf.copy_to_slice(&mut block_buffer);

    Ok(HasherState::from_parts(
        (u64::from(high) << 32) | u64::from(low),
        words,
        block_buffer,
    ))
}

/// Magic only, so snapshots from other versions still route here
pub(super) fn has_tag(input: &[u8]) -> bool {
    input.starts_with(&MAGIC)
}
