//! Incremental SHA-1 engine
//!
//! [`Sha1Hasher`] accepts a message in arbitrary chunks through
//! [`Sha1Hasher::update`], keeps the running compression state in a
//! [`HasherState`], and produces a 20-byte [`Digest`] on
//! [`Sha1Hasher::finalize`]. The state can be exported and restored at any
//! point between updates (see [`crate::codec`]).

use crate::{Error, Result, error::ValidationError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

mod compress;
mod state;
mod traits;

pub use state::HasherState;
pub use traits::StreamingHasher;

use compress::compress;

/// Size of a SHA-1 digest in bytes
pub const DIGEST_SIZE: usize = 20;
/// Number of 32-bit words in the running digest
pub const DIGEST_WORDS: usize = 5;
/// Size of a compression block in bytes
pub const BLOCK_SIZE: usize = 64;

/// SHA-1 initialization vector
pub const INITIAL_WORDS: [u32; DIGEST_WORDS] =
    [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

const PADDING: [u8; BLOCK_SIZE] = {
    let mut padding = [0u8; BLOCK_SIZE];
    padding[0] = 0x80;
    padding
};

/// Offset within a block where the 8-byte length field starts
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// A finished SHA-1 digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    fn from_words(words: &[u32; DIGEST_WORDS]) -> Self {
        let mut bytes = [0u8; DIGEST_SIZE];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Self(bytes)
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Lowercase hex representation
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl std::str::FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != DIGEST_SIZE * 2 {
            return Err(ValidationError::invalid_parameter(
                "digest",
                &format!("expected {} hex characters, got {}", DIGEST_SIZE * 2, s.len()),
            )
            .into());
        }

        let mut bytes = [0u8; DIGEST_SIZE];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = s.get(i * 2..i * 2 + 2).ok_or_else(|| {
                ValidationError::invalid_parameter("digest", "non-ASCII character")
            })?;
            *byte = parse_hex_pair(pair).ok_or_else(|| {
                ValidationError::invalid_parameter("digest", &format!("invalid hex pair '{pair}'"))
            })?;
        }
        Ok(Self(bytes))
    }
}

/// Parse exactly two hex digits; `from_str_radix` alone would take a sign
pub(crate) fn parse_hex_pair(pair: &str) -> Option<u8> {
    if pair.len() == 2 && pair.bytes().all(|b| b.is_ascii_hexdigit()) {
        u8::from_str_radix(pair, 16).ok()
    } else {
        None
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

/// Incremental SHA-1 hasher.
///
/// Not internally synchronized: give each thread its own instance or guard a
/// shared one externally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sha1Hasher {
    state: HasherState,
}

impl Sha1Hasher {
    /// Create a hasher initialized with the SHA-1 IV
    pub fn new() -> Self {
        Self {
            state: HasherState::new(),
        }
    }

    /// Resume from a previously captured state
    pub fn from_state(state: HasherState) -> Self {
        Self { state }
    }

    /// Reset to a fresh IV-initialized state, discarding any buffered input
    pub fn init(&mut self) {
        self.state = HasherState::new();
    }

    /// Current state, for snapshotting
    pub fn state(&self) -> &HasherState {
        &self.state
    }

    /// Replace the current state with `state`
    pub fn restore(&mut self, state: HasherState) {
        self.state = state;
    }

    /// Bytes consumed since the last reset
    pub fn byte_count(&self) -> u64 {
        self.state.byte_count
    }

    /// Consume `input` entirely.
    ///
    /// Completes as many 64-byte blocks as the buffered remainder plus the
    /// new bytes allow and keeps the rest for the next call.
    pub fn update(&mut self, input: &[u8]) {
        if input.is_empty() {
            return;
        }

        let state = &mut self.state;
        let left = state.buffered_len();
        state.byte_count = state.byte_count.wrapping_add(input.len() as u64);

        let mut input = input;
        if left > 0 {
            let fill = BLOCK_SIZE - left;
            if input.len() < fill {
                state.block_buffer[left..left + input.len()].copy_from_slice(input);
                return;
            }

            let (head, rest) = input.split_at(fill);
            state.block_buffer[left..].copy_from_slice(head);
            compress(&mut state.words, &state.block_buffer);
            input = rest;
        }

        let (blocks, tail) = input.as_chunks::<BLOCK_SIZE>();
        for block in blocks {
            compress(&mut state.words, block);
        }
        state.block_buffer[..tail.len()].copy_from_slice(tail);
    }

    /// Finish the current message and return its digest.
    ///
    /// The hasher is reset to the IV afterwards, so a second call without
    /// intervening updates yields the digest of the empty message.
    pub fn finalize(&mut self) -> Digest {
        let (low, high) = self.state.byte_count_halves();
        let bits_high = (low >> 29) | (high << 3);
        let bits_low = low << 3;

        let mut length = [0u8; 8];
        length[..4].copy_from_slice(&bits_high.to_be_bytes());
        length[4..].copy_from_slice(&bits_low.to_be_bytes());

        let last = self.state.buffered_len();
        let pad_len = if last < LENGTH_OFFSET {
            LENGTH_OFFSET - last
        } else {
            BLOCK_SIZE + LENGTH_OFFSET - last
        };

        self.update(&PADDING[..pad_len]);
        self.update(&length);
        debug_assert_eq!(self.state.buffered_len(), 0);

        let digest = Digest::from_words(&self.state.words);
        self.init();
        digest
    }

    /// Hash `input` as one complete message.
    ///
    /// Any message in progress is discarded first.
    pub fn calculate(&mut self, input: &[u8]) -> Digest {
        self.init();
        self.update(input);
        self.finalize()
    }
}

impl StreamingHasher for Sha1Hasher {
    fn update(&mut self, data: &[u8]) {
        Sha1Hasher::update(self, data);
    }

    fn finalize(&mut self) -> Digest {
        Sha1Hasher::finalize(self)
    }

    fn reset(&mut self) {
        self.init();
    }
}

impl std::io::Write for Sha1Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// One-shot SHA-1 of an in-memory buffer
pub fn sha1(input: &[u8]) -> Digest {
    Sha1Hasher::new().calculate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sha1::Digest as _;

    fn reference(data: &[u8]) -> [u8; DIGEST_SIZE] {
        sha1::Sha1::digest(data).into()
    }

    #[test]
    fn test_sha1_known_vectors() {
        let vectors: [(&[u8], &str); 6] = [
            (b"", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            (b"librados", "8a5dbde5a76a1431f092fa7dde144f846de3b219"),
            (b"abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
            (
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
                "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
            ),
            (
                b"The quick brown fox jumps over the lazy dog",
                "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
            ),
            (b"message digest", "c12252ceda8be8994d5fa0290a47231c1d16aae3"),
        ];

        for (input, expected) in vectors {
            assert_eq!(sha1(input).to_hex(), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_million_a() {
        let mut hasher = Sha1Hasher::new();
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            hasher.update(&chunk);
        }
        assert_eq!(
            hasher.finalize().to_hex(),
            "34aa973cd4c4daa4f61eeb2bdbad27316534016f"
        );
    }

    #[test]
    fn test_padding_boundaries_match_reference() {
        // Lengths around the 55/56 split where padding spills into a second block
        for len in [54usize, 55, 56, 57, 63, 64, 65, 119, 120, 127, 128, 129] {
            let data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            assert_eq!(sha1(&data).as_bytes(), &reference(&data), "length {len}");
        }
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"abc");
        let before = hasher.clone();
        hasher.update(&[]);
        assert_eq!(hasher, before);
    }

    #[test]
    fn test_update_tracks_byte_count_and_buffer() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(&[1u8; 30]);
        hasher.update(&[2u8; 50]);

        assert_eq!(hasher.byte_count(), 80);
        assert_eq!(hasher.state().pending(), &[2u8; 16][..]);
    }

    #[test]
    fn test_byte_count_carries_into_high_half() {
        let state = HasherState::from_parts(u32::MAX as u64 - 63, INITIAL_WORDS, [0; BLOCK_SIZE]);
        let mut hasher = Sha1Hasher::from_state(state);
        hasher.update(&[0u8; 128]);

        assert_eq!(hasher.state().byte_count_halves(), (64, 1));
    }

    #[test]
    fn test_finalize_resets_to_initial_state() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"some message that is not empty");
        hasher.finalize();

        assert_eq!(hasher, Sha1Hasher::new());
        assert!(hasher.state().is_initial());
    }

    #[test]
    fn test_double_finalize_yields_empty_digest() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"librados");

        assert_eq!(
            hasher.finalize().to_hex(),
            "8a5dbde5a76a1431f092fa7dde144f846de3b219"
        );
        assert_eq!(
            hasher.finalize().to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_message_after_finalize_is_unaffected() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"previous message");
        hasher.finalize();
        hasher.update(b"abc");

        assert_eq!(hasher.finalize(), sha1(b"abc"));
    }

    #[test]
    fn test_calculate_discards_message_in_progress() {
        let mut hasher = Sha1Hasher::new();
        hasher.update(b"garbage");

        assert_eq!(hasher.calculate(b"abc"), sha1(b"abc"));
        assert!(hasher.state().is_initial());
    }

    #[test]
    fn test_io_write_sink() {
        let mut hasher = Sha1Hasher::new();
        let mut source: &[u8] = b"The quick brown fox jumps over the lazy dog";
        std::io::copy(&mut source, &mut hasher).unwrap();

        assert_eq!(
            hasher.finalize().to_hex(),
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
        );
    }

    #[test]
    fn test_digest_formatting_and_parsing() {
        let digest = sha1(b"librados");

        assert_eq!(
            format!("{digest:X}"),
            "8A5DBDE5A76A1431F092FA7DDE144F846DE3B219"
        );
        assert_eq!(digest.to_string(), digest.to_hex());
        assert_eq!(digest.to_hex().parse::<Digest>().unwrap(), digest);
        assert_eq!(
            "8A5DBDE5A76A1431F092FA7DDE144F846DE3B219"
                .parse::<Digest>()
                .unwrap(),
            digest
        );
        assert!("8a5d".parse::<Digest>().is_err());
        assert!("zz5dbde5a76a1431f092fa7dde144f846de3b219".parse::<Digest>().is_err());
        assert!("+a".repeat(DIGEST_SIZE).parse::<Digest>().is_err());
    }

    #[test]
    fn test_digest_serde_as_hex_string() {
        let digest = sha1(b"");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, "\"da39a3ee5e6b4b0d3255bfef95601890afd80709\"");

        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }

    proptest! {
        #[test]
        fn test_matches_reference(data: Vec<u8>) {
            let ours = sha1(&data);
            prop_assert_eq!(ours.as_bytes(), &reference(&data));
        }

        #[test]
        fn test_chunking_invariance(
            data in proptest::collection::vec(any::<u8>(), 0..1024),
            cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..16),
        ) {
            let mut points: Vec<usize> = cuts.iter().map(|c| c.index(data.len() + 1)).collect();
            points.sort_unstable();

            let mut hasher = Sha1Hasher::new();
            let mut start = 0;
            for point in points {
                hasher.update(&data[start..point]);
                start = point;
            }
            hasher.update(&data[start..]);

            prop_assert_eq!(hasher.finalize(), sha1(&data));
        }

        #[test]
        fn test_hash_determinism(data: Vec<u8>) {
            let first = Sha1Hasher::new().calculate(&data);
            let second = Sha1Hasher::new().calculate(&data);
            prop_assert_eq!(first, second);
        }
    }
}
