//! Test input builders

mod test_data;

pub use test_data::{ALPHANUMERIC, ChunkPlan, random_alphanumeric, seeded_alphanumeric};
