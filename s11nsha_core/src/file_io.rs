//! Reader- and file-driven hashing
//!
//! These helpers feed a byte source through a hasher in bounded chunks. All
//! reads are ordinary blocking reads.

use crate::config::HasherConfig;
use crate::error::IoError;
use crate::hashing::{Digest, Sha1Hasher, StreamingHasher};
use crate::{Error, Result};
use log::{debug, trace};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

/// Feed `reader` into `hasher` until EOF, `buffer_size` bytes at a time.
///
/// Returns the number of bytes consumed. The hasher is not finalized.
pub fn calculate_reader<H, R>(hasher: &mut H, reader: R, buffer_size: usize) -> Result<u64>
where
    H: StreamingHasher + ?Sized,
    R: Read,
{
    feed(hasher, reader, buffer_size, u64::MAX)
}

/// Hash the full content of the file at `path`.
///
/// On failure no digest is produced.
pub fn calculate_file(path: &Path, config: &HasherConfig) -> Result<Digest> {
    config.validate()?;
    let file = open(path)?;

    let mut hasher = Sha1Hasher::new();
    let consumed =
        calculate_reader(&mut hasher, file, config.read_buffer_size).map_err(|e| attach(e, path))?;

    debug!("Hashed {consumed} bytes from {}", path.display());
    Ok(hasher.finalize())
}

/// Feed at most `limit` bytes of the file at `path` into a fresh hasher and
/// return it without finalizing, ready to be snapshotted.
pub fn hash_prefix(path: &Path, limit: u64, config: &HasherConfig) -> Result<Sha1Hasher> {
    config.validate()?;
    let file = open(path)?;

    let mut hasher = Sha1Hasher::new();
    let consumed =
        feed(&mut hasher, file, config.read_buffer_size, limit).map_err(|e| attach(e, path))?;

    debug!(
        "Hashed prefix of {consumed} bytes (limit {limit}) from {}",
        path.display()
    );
    Ok(hasher)
}

/// Continue `hasher` with the part of the file at `path` it has not seen yet.
///
/// The file is read from the hasher's byte count onward, so a hasher restored
/// from a snapshot of the same file picks up exactly where it stopped.
pub fn resume_file(hasher: &mut Sha1Hasher, path: &Path, config: &HasherConfig) -> Result<u64> {
    config.validate()?;
    let offset = hasher.byte_count();
    let mut file = open(path)?;

    let length = file
        .metadata()
        .map_err(|e| IoError::from_std(e).with_path(path))?
        .len();
    if offset > length {
        return Err(IoError::from_std(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("snapshot covers {offset} bytes but file has only {length}"),
        ))
        .with_path(path)
        .into());
    }

    file.seek(SeekFrom::Start(offset))
        .map_err(|e| IoError::from_std(e).with_path(path))?;
    let consumed =
        calculate_reader(hasher, file, config.read_buffer_size).map_err(|e| attach(e, path))?;

    debug!(
        "Resumed {} at byte {offset}, consumed {consumed} more bytes",
        path.display()
    );
    Ok(consumed)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IoError::file_not_found(path).into(),
        ErrorKind::PermissionDenied => IoError::permission_denied(path, e).into(),
        _ => IoError::from_std(e).with_path(path).into(),
    })
}

fn attach(error: Error, path: &Path) -> Error {
    match error {
        Error::Io(io) if io.path.is_none() => Error::Io(io.with_path(path)),
        other => other,
    }
}

fn feed<H, R>(hasher: &mut H, mut reader: R, buffer_size: usize, limit: u64) -> Result<u64>
where
    H: StreamingHasher + ?Sized,
    R: Read,
{
    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut consumed = 0u64;

    while consumed < limit {
        let want = (limit - consumed).min(buffer.len() as u64) as usize;
        let n = match reader.read(&mut buffer[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("Read failed after {consumed} bytes: {e}");
                return Err(IoError::from_std(e).into());
            }
        };

        trace!("Feeding {n} bytes at offset {consumed}");
        hasher.update(&buffer[..n]);
        consumed += n as u64;
    }

    Ok(consumed)
}
