mod common;

use chrono::{Duration, Utc};
use common::{issue, jane_roe, john_doe, temp_store};
use keymint_license::{Edition, LicenseError, LicenseRecord, LicenseStore, StorageLocation};
use pretty_assertions::assert_eq;

// ── Round trip ───────────────────────────────────────────────────

#[test]
fn add_then_list_round_trips() {
    let (_dir, store) = temp_store();
    let record = issue(&john_doe());
    store.add(&record).unwrap();

    let listed = store.list(Some("john_doe")).unwrap();
    assert_eq!(listed, vec![record]);
}

#[test]
fn list_filters_by_username() {
    let (_dir, store) = temp_store();
    store.add(&issue(&john_doe())).unwrap();
    store.add(&issue(&jane_roe())).unwrap();

    let listed = store.list(Some("jane_roe")).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].username, "jane_roe");
}

#[test]
fn list_without_filter_returns_all() {
    let (_dir, store) = temp_store();
    store.add(&issue(&john_doe())).unwrap();
    store.add(&issue(&jane_roe())).unwrap();
    assert_eq!(store.list(None).unwrap().len(), 2);
}

#[test]
fn generate_always_appends() {
    let (_dir, store) = temp_store();
    let record = issue(&john_doe());
    store.add(&record).unwrap();
    store.add(&record).unwrap();

    // Uniqueness is not enforced; re-generation creates a sibling record.
    assert_eq!(store.list(Some("john_doe")).unwrap().len(), 2);
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("licenses.json");
    let record = issue(&john_doe());

    LicenseStore::open(StorageLocation::new(&path))
        .add(&record)
        .unwrap();

    let reopened = LicenseStore::open(StorageLocation::new(&path));
    assert_eq!(reopened.list(None).unwrap(), vec![record]);
}

// ── Removal ──────────────────────────────────────────────────────

#[test]
fn remove_deletes_all_for_username() {
    let (_dir, store) = temp_store();
    store.add(&issue(&john_doe())).unwrap();
    store.add(&issue(&john_doe())).unwrap();
    store.add(&issue(&jane_roe())).unwrap();

    let removed = store.remove("john_doe", None, None).unwrap();
    assert_eq!(removed, 2);
    assert!(store.list(Some("john_doe")).unwrap().is_empty());
    assert_eq!(store.list(None).unwrap().len(), 1);
}

#[test]
fn remove_narrows_by_version_and_edition() {
    let (_dir, store) = temp_store();
    let v22 = keymint_license::Identity::new("john_doe", "22.0", Edition::Professional).unwrap();
    let v23 = keymint_license::Identity::new("john_doe", "23.0", Edition::Professional).unwrap();
    let home = keymint_license::Identity::new("john_doe", "22.0", Edition::Home).unwrap();
    store.add(&issue(&v22)).unwrap();
    store.add(&issue(&v23)).unwrap();
    store.add(&issue(&home)).unwrap();

    let removed = store
        .remove("john_doe", Some("22.0"), Some(Edition::Professional))
        .unwrap();
    assert_eq!(removed, 1);

    let remaining = store.list(Some("john_doe")).unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(
        !remaining
            .iter()
            .any(|r| r.version == "22.0" && r.edition == Edition::Professional)
    );
}

#[test]
fn remove_nothing_returns_zero() {
    let (_dir, store) = temp_store();
    store.add(&issue(&john_doe())).unwrap();
    assert_eq!(store.remove("nobody", None, None).unwrap(), 0);
}

#[test]
fn remove_nothing_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("licenses.json");
    let store = LicenseStore::open(StorageLocation::new(&path));
    store.add(&issue(&john_doe())).unwrap();

    let before = std::fs::read(&path).unwrap();
    store.remove("nobody", None, None).unwrap();
    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn remove_on_missing_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("licenses.json");
    let store = LicenseStore::open(StorageLocation::new(&path));

    assert_eq!(store.remove("john_doe", None, None).unwrap(), 0);
    assert!(!path.exists());
}

// ── Missing and corrupt files ────────────────────────────────────

#[test]
fn missing_file_reads_as_empty() {
    let (_dir, store) = temp_store();
    assert!(store.list(None).unwrap().is_empty());
}

#[test]
fn unparseable_file_surfaces_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("licenses.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store = LicenseStore::open(StorageLocation::new(&path));
    let err = store.list(None).unwrap_err();
    assert!(matches!(err, LicenseError::Store(_)));
    assert!(format!("{err}").contains("licenses.json"));
}

#[test]
fn wrong_schema_surfaces_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("licenses.json");
    std::fs::write(&path, r#"{"schema": 2, "records": []}"#).unwrap();

    let store = LicenseStore::open(StorageLocation::new(&path));
    assert!(matches!(
        store.list(None).unwrap_err(),
        LicenseError::Store(_)
    ));
}

// ── Latest record selection ──────────────────────────────────────

#[test]
fn latest_for_prefers_most_recent() {
    let (_dir, store) = temp_store();
    let identity = john_doe();
    let older = LicenseRecord::issue_at(&identity, Utc::now() - Duration::days(30)).unwrap();
    let newer = LicenseRecord::issue_at(&identity, Utc::now()).unwrap();
    store.add(&older).unwrap();
    store.add(&newer).unwrap();

    let latest = store.latest_for(&identity).unwrap().unwrap();
    assert_eq!(latest.created_at, newer.created_at);
}

#[test]
fn latest_for_ignores_other_identities() {
    let (_dir, store) = temp_store();
    store.add(&issue(&jane_roe())).unwrap();
    assert!(store.latest_for(&john_doe()).unwrap().is_none());
}

// ── On-disk shape ────────────────────────────────────────────────

#[test]
fn store_file_is_a_json_array_of_flat_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("licenses.json");
    let store = LicenseStore::open(StorageLocation::new(&path));
    store.add(&issue(&john_doe())).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    for field in [
        "username",
        "version",
        "edition",
        "license_key",
        "activation_code",
        "created_at",
        "expires_at",
    ] {
        assert!(records[0].get(field).is_some(), "missing {field}");
    }
    // Status is computed at read time, never persisted.
    assert!(records[0].get("status").is_none());
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("licenses.json");
    let store = LicenseStore::open(StorageLocation::new(&path));
    store.add(&issue(&john_doe())).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("licenses.json")]);
}
