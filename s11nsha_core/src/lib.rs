//! s11nsha Core Library
//!
//! Incremental SHA-1 hashing whose in-progress state can be serialized,
//! shipped elsewhere and resumed later with an identical final digest.
//!
//! ```
//! use s11nsha_core::{Sha1Hasher, SnapshotEncoding, codec};
//!
//! let mut hasher = Sha1Hasher::new();
//! hasher.update(b"libra");
//! let snapshot = codec::marshal_hasher(&hasher, SnapshotEncoding::Text);
//!
//! let mut resumed = Sha1Hasher::from_state(codec::unmarshal(&snapshot, SnapshotEncoding::Text)?);
//! resumed.update(b"dos");
//! assert_eq!(
//!     resumed.finalize().to_hex(),
//!     "8a5dbde5a76a1431f092fa7dde144f846de3b219"
//! );
//! # Ok::<(), s11nsha_core::Error>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod file_io;
pub mod hashing;

// Re-export main types
pub use codec::{SnapshotEncoding, marshal, unmarshal};
pub use config::HasherConfig;
pub use error::{Error, Result};
pub use file_io::{calculate_file, calculate_reader, hash_prefix, resume_file};
pub use hashing::{
    BLOCK_SIZE, DIGEST_SIZE, Digest, HasherState, Sha1Hasher, StreamingHasher, sha1,
};
