//! Streaming hasher seam

use super::Digest;

/// Incremental SHA-1 computation driven chunk by chunk.
///
/// Implemented by [`super::Sha1Hasher`]; comparison harnesses implement it
/// for reference hashers so both can be fed through the same code paths.
pub trait StreamingHasher: Send {
    /// Feed more message bytes
    fn update(&mut self, data: &[u8]);

    /// Terminate the current message, return its digest and start over
    fn finalize(&mut self) -> Digest;

    /// Discard the current message
    fn reset(&mut self);
}
