//! Snapshot persistence
//!
//! The snapshot is a JSON file holding an array of flat record objects,
//! pretty-printed for hand inspection. Saves follow the
//! write-temp / fsync / rename sequence so a crashed save never leaves a
//! half-written snapshot behind the live one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::Transaction;

/// Handle to the snapshot file backing a record store.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a handle for the snapshot at `path`.
    ///
    /// Does not touch the filesystem; the first `load` or `save` does.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full record sequence from the snapshot file.
    ///
    /// Fails with `LEDGER_SNAPSHOT_NOT_FOUND` when the file is missing and
    /// `LEDGER_SNAPSHOT_PARSE_FAILED` when it is not a JSON array of objects.
    pub fn load(&self) -> StoreResult<Vec<Transaction>> {
        let bytes = fs::read(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::not_found(format!("snapshot missing: {}", self.path.display()))
            } else {
                StoreError::io_error(
                    format!("failed to read snapshot: {}", self.path.display()),
                    e,
                )
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::parse_failed(format!(
                "snapshot is not well-formed: {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Write the full record sequence to the snapshot file.
    ///
    /// The sequence is:
    /// 1. Serialize to a temp file beside the target
    /// 2. fsync the temp file
    /// 3. Rename over the target
    ///
    /// Either the old snapshot or the new one is on disk at every point.
    pub fn save(&self, records: &[Transaction]) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::io_error_no_source(format!("serialize failed: {}", e)))?;

        let tmp_path = self.temp_path();

        let mut tmp = File::create(&tmp_path).map_err(|e| {
            StoreError::io_error(
                format!("failed to create temp snapshot: {}", tmp_path.display()),
                e,
            )
        })?;

        tmp.write_all(&json).map_err(|e| {
            StoreError::io_error(
                format!("failed to write temp snapshot: {}", tmp_path.display()),
                e,
            )
        })?;

        tmp.sync_all().map_err(|e| {
            StoreError::io_error(
                format!("fsync failed: {}", tmp_path.display()),
                e,
            )
        })?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            StoreError::io_error(
                format!(
                    "failed to move snapshot into place: {} -> {}",
                    tmp_path.display(),
                    self.path.display()
                ),
                e,
            )
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
