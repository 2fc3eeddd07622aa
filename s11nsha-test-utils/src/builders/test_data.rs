//! Random message and chunking builders

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Alphabet used for generated messages
pub const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Random `[0-9A-Za-z]` string of `len` bytes from the thread RNG
pub fn random_alphanumeric(len: usize) -> Vec<u8> {
    let mut rng = rand::rngs::ThreadRng::default();
    fill_alphanumeric(&mut rng, len)
}

/// Reproducible `[0-9A-Za-z]` string of `len` bytes
pub fn seeded_alphanumeric(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    fill_alphanumeric(&mut rng, len)
}

fn fill_alphanumeric<R: Rng>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| ALPHANUMERIC[rng.random_range(0..ALPHANUMERIC.len())])
        .collect()
}

/// A way of splitting a message into consecutive `update` calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    sizes: Vec<usize>,
}

impl ChunkPlan {
    /// Chunks of exactly the given sizes
    pub fn from_sizes(sizes: Vec<usize>) -> Self {
        Self { sizes }
    }

    /// Fixed-size chunks covering `total` bytes; the last one may be short
    pub fn uniform(total: usize, chunk: usize) -> Self {
        let chunk = chunk.max(1);
        let mut sizes = vec![chunk; total / chunk];
        if total % chunk != 0 {
            sizes.push(total % chunk);
        }
        Self { sizes }
    }

    /// Random chunk sizes in `1..=max_chunk` (zero-length chunks mixed in)
    /// covering `total` bytes
    pub fn random(total: usize, max_chunk: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let max_chunk = max_chunk.max(1);
        let mut sizes = Vec::new();
        let mut remaining = total;

        while remaining > 0 {
            let size = if rng.random_range(0..10) == 0 {
                0
            } else {
                rng.random_range(1..=max_chunk).min(remaining)
            };
            sizes.push(size);
            remaining -= size;
        }
        Self { sizes }
    }

    /// Chunk sizes in order
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Total bytes covered by the plan
    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Split `data` according to the plan.
    ///
    /// Panics if the plan does not cover `data` exactly.
    pub fn split<'a>(&self, data: &'a [u8]) -> Vec<&'a [u8]> {
        assert_eq!(self.total(), data.len(), "chunk plan does not cover input");

        let mut chunks = Vec::with_capacity(self.sizes.len());
        let mut rest = data;
        for &size in &self.sizes {
            let (head, tail) = rest.split_at(size);
            chunks.push(head);
            rest = tail;
        }
        chunks
    }
}
