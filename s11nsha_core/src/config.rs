//! Hasher configuration

use crate::codec::SnapshotEncoding;
use crate::{Result, error::ValidationError};
use serde::{Deserialize, Serialize};

/// Default read chunk for file-driven hashing (4 KiB)
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4 * 1024;

/// Upper bound on the read chunk, keeps a typo from allocating gigabytes
pub const MAX_READ_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Settings for file hashing and snapshot handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Bytes read from a source per `update` call
    pub read_buffer_size: usize,
    /// Encoding used when none is given explicitly
    pub snapshot_encoding: SnapshotEncoding,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            snapshot_encoding: SnapshotEncoding::Text,
        }
    }
}

impl HasherConfig {
    /// Create a test configuration with a tiny read buffer
    pub fn test() -> Self {
        Self {
            read_buffer_size: 17, // deliberately not a multiple of the block size
            snapshot_encoding: SnapshotEncoding::Text,
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.read_buffer_size == 0 {
            return Err(
                ValidationError::invalid_configuration("read_buffer_size must be non-zero").into(),
            );
        }
        if self.read_buffer_size > MAX_READ_BUFFER_SIZE {
            return Err(ValidationError::invalid_configuration(&format!(
                "read_buffer_size {} exceeds maximum of {MAX_READ_BUFFER_SIZE} bytes",
                self.read_buffer_size
            ))
            .into());
        }
        Ok(())
    }
}
