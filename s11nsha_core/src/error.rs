//! Error types for the s11nsha core library
//!
//! Hashing itself never fails. Errors only come from reading input sources,
//! decoding snapshots and validating configuration.

use thiserror::Error;

pub mod codec;
pub mod io;
pub mod validation;

pub use self::codec::CodecError;
pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the s11nsha core library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Snapshot decoding errors
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}
