//! Persistent hasher state

use super::{BLOCK_SIZE, DIGEST_WORDS, INITIAL_WORDS};
use std::fmt;

/// Complete resumable state of a SHA-1 computation.
///
/// `byte_count % 64` is always the number of meaningful bytes at the front of
/// `block_buffer`; the rest of the buffer is filler. `words` reflects the
/// compression of every whole block consumed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasherState {
    pub(crate) byte_count: u64,
    pub(crate) words: [u32; DIGEST_WORDS],
    pub(crate) block_buffer: [u8; BLOCK_SIZE],
}

impl HasherState {
    /// Fresh state: IV words, nothing consumed
    pub const fn new() -> Self {
        Self {
            byte_count: 0,
            words: INITIAL_WORDS,
            block_buffer: [0u8; BLOCK_SIZE],
        }
    }

    /// Rebuild a state from its exposed fields
    pub const fn from_parts(
        byte_count: u64,
        words: [u32; DIGEST_WORDS],
        block_buffer: [u8; BLOCK_SIZE],
    ) -> Self {
        Self {
            byte_count,
            words,
            block_buffer,
        }
    }

    /// Bytes consumed since the last reset
    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    /// Byte count split into `(low, high)` 32-bit halves
    pub fn byte_count_halves(&self) -> (u32, u32) {
        (self.byte_count as u32, (self.byte_count >> 32) as u32)
    }

    /// Running digest words
    pub fn words(&self) -> &[u32; DIGEST_WORDS] {
        &self.words
    }

    /// Raw block buffer, including filler past [`Self::buffered_len`]
    pub fn block_buffer(&self) -> &[u8; BLOCK_SIZE] {
        &self.block_buffer
    }

    /// Number of meaningful bytes in the block buffer
    pub fn buffered_len(&self) -> usize {
        (self.byte_count % BLOCK_SIZE as u64) as usize
    }

    /// The unprocessed remainder of the input stream
    pub fn pending(&self) -> &[u8] {
        &self.block_buffer[..self.buffered_len()]
    }

    /// Whether this state is indistinguishable from a fresh one
    pub fn is_initial(&self) -> bool {
        self.byte_count == 0 && self.words == INITIAL_WORDS
    }
}

impl Default for HasherState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HasherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (low, high) = self.byte_count_halves();
        writeln!(f, "total[0, 1] = [{low}, {high}]")?;
        for (i, word) in self.words.iter().enumerate() {
            writeln!(f, "state[{i}] = {word:#010x}")?;
        }
        write!(f, "buffer[{}] =", self.buffered_len())?;
        for byte in self.pending() {
            write!(f, " {byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_uses_iv() {
        let state = HasherState::new();

        assert_eq!(
            state.words(),
            &[0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0]
        );
        assert_eq!(state.byte_count(), 0);
        assert!(state.pending().is_empty());
        assert!(state.is_initial());
        assert_eq!(state, HasherState::default());
    }

    #[test]
    fn test_byte_count_halves() {
        let state = HasherState::from_parts(0x0000_0003_0000_0010, INITIAL_WORDS, [0; 64]);
        assert_eq!(state.byte_count_halves(), (0x10, 3));
    }

    #[test]
    fn test_pending_tracks_byte_count_modulo_block() {
        let mut buffer = [0xEEu8; BLOCK_SIZE];
        buffer[..3].copy_from_slice(b"xyz");
        let state = HasherState::from_parts(64 * 7 + 3, INITIAL_WORDS, buffer);

        assert_eq!(state.buffered_len(), 3);
        assert_eq!(state.pending(), b"xyz");
        assert!(!state.is_initial());
    }

    #[test]
    fn test_display_dump() {
        let mut buffer = [0u8; BLOCK_SIZE];
        buffer[0] = b'a';
        let state = HasherState::from_parts(1, INITIAL_WORDS, buffer);
        let dump = state.to_string();

        assert!(dump.contains("total[0, 1] = [1, 0]"));
        assert!(dump.contains("state[0] = 0x67452301"));
        assert!(dump.contains("state[4] = 0xc3d2e1f0"));
        assert!(dump.ends_with("buffer[1] = 61"));
    }
}
