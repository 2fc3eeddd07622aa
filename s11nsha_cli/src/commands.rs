//! Command implementations
//!
//! Each command writes its normal output to the supplied writer so it can be
//! exercised without spawning the binary.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use s11nsha_core::codec::{self, SnapshotEncoding};
use s11nsha_core::{
    Digest, HasherState, Sha1Hasher, calculate_file, calculate_reader, hash_prefix, resume_file,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path argument that means "read standard input"
pub const STDIN_PATH: &str = "-";

fn format_digest(digest: &Digest, uppercase: bool) -> String {
    if uppercase {
        format!("{digest:X}")
    } else {
        format!("{digest:x}")
    }
}

/// Hash each path and print `<digest>  <path>` lines.
///
/// Keeps going after a failing path and reports the failures at the end.
pub fn hash_paths(
    config: &AppConfig,
    paths: &[PathBuf],
    uppercase: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut failures = 0usize;

    for path in paths {
        let result = if path.as_os_str() == STDIN_PATH {
            hash_stdin(config)
        } else {
            calculate_file(path, &config.hasher).map_err(anyhow::Error::from)
        };

        match result {
            Ok(digest) => {
                writeln!(out, "{}  {}", format_digest(&digest, uppercase), path.display())?;
            }
            Err(e) => {
                log::error!("Failed to hash {}: {e:#}", path.display());
                eprintln!("s11nsha: {}: {e:#}", path.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} input(s) could not be hashed", paths.len());
    }
    Ok(())
}

fn hash_stdin(config: &AppConfig) -> Result<Digest> {
    let mut hasher = Sha1Hasher::new();
    let stdin = std::io::stdin().lock();
    calculate_reader(&mut hasher, stdin, config.hasher.read_buffer_size)
        .context("Failed to read standard input")?;
    Ok(hasher.finalize())
}

/// Hash up to `limit` bytes of `file` and save the in-progress state.
pub fn snapshot(
    config: &AppConfig,
    file: &Path,
    output: &Path,
    limit: Option<u64>,
    encoding: Option<SnapshotEncoding>,
    out: &mut dyn Write,
) -> Result<()> {
    let encoding = encoding.unwrap_or(config.hasher.snapshot_encoding);
    let hasher = hash_prefix(file, limit.unwrap_or(u64::MAX), &config.hasher)
        .with_context(|| format!("Failed to hash {}", file.display()))?;

    fs::write(output, codec::marshal_hasher(&hasher, encoding))
        .with_context(|| format!("Failed to write snapshot {}", output.display()))?;

    writeln!(
        out,
        "Saved {encoding} snapshot of {} at byte {} to {}",
        file.display(),
        hasher.byte_count(),
        output.display()
    )?;
    Ok(())
}

/// Read and decode a snapshot file.
///
/// Without an explicit encoding the tag embedded in the snapshot decides,
/// falling back to the configured default.
pub fn load_snapshot(
    config: &AppConfig,
    path: &Path,
    encoding: Option<SnapshotEncoding>,
) -> Result<HasherState> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let encoding = encoding
        .or_else(|| codec::detect(&bytes))
        .unwrap_or(config.hasher.snapshot_encoding);

    log::debug!("Decoding {} as {encoding} snapshot", path.display());
    codec::unmarshal(&bytes, encoding)
        .with_context(|| format!("Failed to decode snapshot {}", path.display()))
}

/// Restore a snapshot, hash the rest of `file` and print the digest.
pub fn resume(
    config: &AppConfig,
    snapshot: &Path,
    file: &Path,
    encoding: Option<SnapshotEncoding>,
    uppercase: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut hasher = Sha1Hasher::from_state(load_snapshot(config, snapshot, encoding)?);
    let resumed_at = hasher.byte_count();

    resume_file(&mut hasher, file, &config.hasher)
        .with_context(|| format!("Failed to resume hashing {}", file.display()))?;
    log::info!("Resumed {} from byte {resumed_at}", file.display());

    let digest = hasher.finalize();
    writeln!(out, "{}  {}", format_digest(&digest, uppercase), file.display())?;
    Ok(())
}

/// Print the decoded contents of a snapshot.
pub fn dump(
    config: &AppConfig,
    snapshot: &Path,
    encoding: Option<SnapshotEncoding>,
    out: &mut dyn Write,
) -> Result<()> {
    let state = load_snapshot(config, snapshot, encoding)?;
    writeln!(out, "{state}")?;
    Ok(())
}
