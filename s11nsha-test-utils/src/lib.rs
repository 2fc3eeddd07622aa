//! Test utilities for s11nsha
//!
//! Random input generators, chunking helpers and a reference SHA-1 adapter
//! used by comparison tests and benchmarks.

pub mod builders;
pub mod reference;

// Re-export commonly used types
pub use builders::{ChunkPlan, random_alphanumeric, seeded_alphanumeric};
pub use reference::{ReferenceSha1, encode_hex};
