//! JSON-backed license record store.
//!
//! A single on-disk JSON array owned exclusively by this tool. Every
//! mutating call does a whole-file load-modify-save; writes land in a
//! sibling temp file and are renamed into place, so the store is never left
//! half-written. Concurrent invocations are last-writer-wins: this is a
//! single-user, single-process tool, and file locking is deliberately out of
//! scope.

use crate::error::{LicenseError, LicenseResult};
use crate::identity::{Edition, Identity};
use crate::record::LicenseRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the store file lives.
///
/// Passed in explicitly at construction; the store never resolves ambient
/// global paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation(PathBuf);

impl StorageLocation {
    /// Wraps a path as a storage location.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the underlying path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// The persisted collection of license records for all usernames ever
/// generated.
pub struct LicenseStore {
    location: StorageLocation,
}

impl LicenseStore {
    /// Opens a store at the given location.
    ///
    /// No I/O happens until the first operation; a missing file reads as an
    /// empty store.
    #[must_use]
    pub fn open(location: StorageLocation) -> Self {
        Self { location }
    }

    /// Appends a record. Never overwrites; re-generating for the same
    /// identity appends a sibling record, and dedup is the caller's call.
    pub fn add(&self, record: &LicenseRecord) -> LicenseResult<()> {
        let mut records = self.load()?;
        records.push(record.clone());
        self.save(&records)?;
        debug!(username = %record.username, "license record added");
        Ok(())
    }

    /// Lists records, optionally filtered by username. Status is computed by
    /// the caller at read time via [`LicenseRecord::status`].
    pub fn list(&self, username: Option<&str>) -> LicenseResult<Vec<LicenseRecord>> {
        let mut records = self.load()?;
        if let Some(username) = username {
            records.retain(|record| record.username == username);
        }
        Ok(records)
    }

    /// Removes all records matching the filter and returns how many were
    /// deleted. Zero matches is a valid idempotent outcome, not an error,
    /// and leaves the file untouched.
    pub fn remove(
        &self,
        username: &str,
        version: Option<&str>,
        edition: Option<Edition>,
    ) -> LicenseResult<usize> {
        let mut records = self.load()?;
        let before = records.len();

        records.retain(|record| {
            !(record.username == username
                && version.is_none_or(|v| record.version == v)
                && edition.is_none_or(|e| record.edition == e))
        });

        let removed = before - records.len();
        if removed > 0 {
            self.save(&records)?;
            debug!(username, removed, "license records removed");
        }
        Ok(removed)
    }

    /// Returns the most recently created record for an exact identity, if
    /// one exists.
    pub fn latest_for(&self, identity: &Identity) -> LicenseResult<Option<LicenseRecord>> {
        let records = self.load()?;
        Ok(records
            .into_iter()
            .filter(|record| record.matches(identity))
            .max_by_key(|record| record.created_at))
    }

    fn load(&self) -> LicenseResult<Vec<LicenseRecord>> {
        let path = self.location.path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(path)
            .map_err(|e| LicenseError::Store(format!("failed to read {}: {e}", path.display())))?;

        // No schema version tag exists; anything unparseable surfaces as a
        // store error naming the path rather than a guessed migration.
        serde_json::from_slice(&bytes).map_err(|e| {
            LicenseError::Store(format!("unparseable store file {}: {e}", path.display()))
        })
    }

    fn save(&self, records: &[LicenseRecord]) -> LicenseResult<()> {
        let path = self.location.path();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LicenseError::Store(format!("failed to create {}: {e}", parent.display()))
                })?;
            }
        }

        let json = serde_json::to_vec_pretty(records)?;

        // Write-then-rename so a failed write never clobbers the store.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .map_err(|e| LicenseError::Store(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, path).map_err(|e| {
            LicenseError::Store(format!("failed to replace {}: {e}", path.display()))
        })?;
        Ok(())
    }
}
