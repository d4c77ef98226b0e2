//! Integration-level tests for the JSON settings store.
//!
//! Exercises missing-file behaviour, merge semantics, key filtering and the
//! read errors surfaced for corrupt files.

use serde_json::json;
use tempfile::TempDir;
use unibrowser_sync::services::settings_store::{SettingsStore, SettingsStoreTrait};
use unibrowser_sync::types::errors::SettingsError;
use unibrowser_sync::types::settings::SettingsMap;

/// Helper: a store backed by `settings.json` inside `dir`.
fn store_in_temp(dir: &TempDir) -> SettingsStore {
    SettingsStore::new(Some(dir.path().join("settings.json")))
}

fn map(value: serde_json::Value) -> SettingsMap {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in_temp(&dir);

    assert!(!store.exists());
    assert!(store.get_all().unwrap().is_empty());
    assert!(store.get(&["auto_sync_enabled"]).unwrap().is_empty());
}

#[test]
fn test_set_then_get_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    store_in_temp(&dir)
        .set(map(json!({"auto_sync_enabled": true, "auto_sync_interval": 30})))
        .unwrap();

    let store = store_in_temp(&dir);
    assert!(store.exists());
    assert_eq!(
        store.get(&["auto_sync_enabled", "auto_sync_interval"]).unwrap(),
        map(json!({"auto_sync_enabled": true, "auto_sync_interval": 30}))
    );
}

#[test]
fn test_set_merges_with_existing_values() {
    let dir = TempDir::new().unwrap();
    let store = store_in_temp(&dir);

    store.set(map(json!({"device_name": "Desk", "auto_sync_interval": 10}))).unwrap();
    store.set(map(json!({"auto_sync_interval": 20}))).unwrap();

    assert_eq!(
        store.get_all().unwrap(),
        map(json!({"device_name": "Desk", "auto_sync_interval": 20}))
    );
}

#[test]
fn test_get_returns_only_present_requested_keys() {
    let dir = TempDir::new().unwrap();
    let store = store_in_temp(&dir);
    store.set(map(json!({"device_name": "Desk", "other": 1}))).unwrap();

    let got = store.get(&["device_name", "profile_name"]).unwrap();
    assert_eq!(got, map(json!({"device_name": "Desk"})));
}

#[test]
fn test_external_edits_are_seen_on_next_read() {
    let dir = TempDir::new().unwrap();
    let store = store_in_temp(&dir);
    store.set(map(json!({"auto_sync_enabled": false}))).unwrap();

    std::fs::write(store.path(), r#"{"auto_sync_enabled": true}"#).unwrap();

    assert_eq!(store.get(&["auto_sync_enabled"]).unwrap()["auto_sync_enabled"], json!(true));
}

#[test]
fn test_set_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::new(Some(dir.path().join("nested").join("deeper").join("s.json")));

    store.set(map(json!({"a": 1}))).unwrap();
    assert!(store.exists());
}

#[test]
fn test_empty_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in_temp(&dir);
    std::fs::write(store.path(), "  \n").unwrap();

    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in_temp(&dir);
    std::fs::write(store.path(), "{not json").unwrap();

    assert!(matches!(store.get(&["a"]), Err(SettingsError::Read(_))));
    assert!(matches!(store.set(SettingsMap::new()), Err(SettingsError::Read(_))));
}

#[test]
fn test_non_object_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in_temp(&dir);
    std::fs::write(store.path(), "[1, 2, 3]").unwrap();

    let err = store.get_all().unwrap_err();
    assert!(err.to_string().contains("expected a JSON object"));
}
