//! Shared test helpers for license tests.

#![allow(dead_code)]

use keymint_license::{Edition, Identity, LicenseRecord, LicenseStore, StorageLocation};
use tempfile::TempDir;

/// Standard test identity from the generation scenario.
pub fn john_doe() -> Identity {
    Identity::new("john_doe", "22.0", Edition::Professional).unwrap()
}

/// A second identity sharing nothing with `john_doe`.
pub fn jane_roe() -> Identity {
    Identity::new("jane_roe", "21.1", Edition::Home).unwrap()
}

/// Opens a store backed by a fresh temp directory. Keep the returned
/// `TempDir` alive for the duration of the test.
pub fn temp_store() -> (TempDir, LicenseStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LicenseStore::open(StorageLocation::new(dir.path().join("licenses.json")));
    (dir, store)
}

/// Issues a record for the given identity.
pub fn issue(identity: &Identity) -> LicenseRecord {
    LicenseRecord::issue(identity).unwrap()
}

/// Flips one character of a key, yielding a same-length mutated key.
pub fn mutate_key(key: &str) -> String {
    let mut chars: Vec<char> = key.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}
