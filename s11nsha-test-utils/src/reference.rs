//! Reference SHA-1 implementation behind the engine's streaming seam

use s11nsha_core::{Digest, StreamingHasher};
use sha1::Digest as _;

/// Adapter driving the `sha1` crate through [`StreamingHasher`]
#[derive(Debug, Clone, Default)]
pub struct ReferenceSha1 {
    inner: sha1::Sha1,
}

impl ReferenceSha1 {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot reference digest
    pub fn digest(data: &[u8]) -> Digest {
        let bytes: [u8; 20] = sha1::Sha1::digest(data).into();
        Digest::from(bytes)
    }
}

impl StreamingHasher for ReferenceSha1 {
    fn update(&mut self, data: &[u8]) {
        sha1::Digest::update(&mut self.inner, data);
    }

    fn finalize(&mut self) -> Digest {
        let bytes: [u8; 20] = self.inner.finalize_reset().into();
        Digest::from(bytes)
    }

    fn reset(&mut self) {
        sha1::Digest::reset(&mut self.inner);
    }
}

/// Uppercase hex, the way digests were presented by the comparison drivers
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_known_vector() {
        assert_eq!(
            encode_hex(ReferenceSha1::digest(b"librados").as_bytes()),
            "8A5DBDE5A76A1431F092FA7DDE144F846DE3B219"
        );
    }

    #[test]
    fn test_reference_finalize_resets() {
        let mut hasher = ReferenceSha1::new();
        hasher.update(b"abc");
        hasher.finalize();

        assert_eq!(hasher.finalize(), ReferenceSha1::digest(b""));
    }
}
