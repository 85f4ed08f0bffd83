//! Writing fetched bytes to disk
//!
//! Writes are per-file best effort: a failed write is an error for that one
//! resource, never for the run. Distinct URLs write to disjoint paths, so no
//! locking is needed beyond the filesystem's own write atomicity; mapped-path
//! collisions are accepted with the last writer winning.

use std::io;
use std::path::{Path, PathBuf};

/// Persists one resource beneath the output root
///
/// Parent directories are created as needed.
///
/// # Arguments
///
/// * `root` - The output root directory
/// * `relative` - The mapped relative path for this resource
/// * `bytes` - The fetched body
///
/// # Returns
///
/// * `Ok(PathBuf)` - The full path that was written
/// * `Err(io::Error)` - Directory creation or write failed
pub async fn persist(root: &Path, relative: &Path, bytes: &[u8]) -> io::Result<PathBuf> {
    let destination = root.join(relative);

    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(&destination, bytes).await?;

    Ok(destination)
}
