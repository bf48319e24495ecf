//! On-disk snapshot cache
//!
//! The fetch time of a snapshot is the cache file's modification time.
//! Writes go to a temp file in the same directory and are renamed over the
//! cache file.

use crate::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Snapshot bytes plus the time they were fetched
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    /// Raw snapshot
    pub bytes: Bytes,
    /// Fetch time
    pub fetched_at: DateTime<Utc>,
}

/// File-backed snapshot cache
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    /// Cache at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached snapshot, `None` if there is none yet
    pub fn load(&self) -> Result<Option<CachedSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let modified = fs::metadata(&self.path)?.modified()?;

        Ok(Some(CachedSnapshot {
            bytes: Bytes::from(bytes),
            fetched_at: DateTime::<Utc>::from(modified),
        }))
    }

    /// Replace the cached snapshot atomically
    pub fn store(&self, bytes: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Stored {} byte sanctions snapshot at {}", bytes.len(), self.path.display());
        Ok(())
    }
}
