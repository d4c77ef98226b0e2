//! Tests for payload assembly and per-field metadata defaulting.

use rstest::rstest;
use unibrowser_sync::services::payload_builder::build_payload;
use unibrowser_sync::types::bookmark::FlatBookmarkRecord;
use unibrowser_sync::types::config::HostDialect;
use unibrowser_sync::types::sync::SyncMetadata;

fn meta(browser: Option<&str>, device: Option<&str>, profile: Option<&str>) -> SyncMetadata {
    SyncMetadata {
        browser_name: browser.map(str::to_string),
        device_name: device.map(str::to_string),
        profile_name: profile.map(str::to_string),
    }
}

#[rstest]
#[case::all_absent(HostDialect::Chrome, meta(None, None, None), ("Chrome", "Laptop Lokal", "Default"))]
#[case::firefox_default(HostDialect::Firefox, meta(None, None, None), ("Firefox", "Laptop Lokal", "Default"))]
#[case::device_only(HostDialect::Chrome, meta(None, Some("Desk"), None), ("Chrome", "Desk", "Default"))]
#[case::empty_strings(HostDialect::Firefox, meta(Some(""), Some(""), Some("")), ("Firefox", "Laptop Lokal", "Default"))]
#[case::all_given(HostDialect::Chrome, meta(Some("Brave"), Some("Work PC"), Some("Dev")), ("Brave", "Work PC", "Dev"))]
fn test_metadata_defaults_apply_per_field(
    #[case] dialect: HostDialect,
    #[case] metadata: SyncMetadata,
    #[case] expected: (&str, &str, &str),
) {
    let payload = build_payload(&metadata, &dialect.metadata_defaults(), Vec::new());
    assert_eq!(payload.browser_name, expected.0);
    assert_eq!(payload.device_name, expected.1);
    assert_eq!(payload.profile_name, expected.2);
}

#[test]
fn test_records_pass_through_unchanged() {
    let records = vec![FlatBookmarkRecord {
        title: "not validated <>".to_string(),
        url: "not a url".to_string(),
        folder_path: "A/B".to_string(),
        created_at: None,
    }];

    let payload = build_payload(
        &SyncMetadata::default(),
        &HostDialect::Chrome.metadata_defaults(),
        records.clone(),
    );
    assert_eq!(payload.bookmarks, records);
}

#[test]
fn test_payload_json_shape() {
    let payload = build_payload(
        &meta(None, Some("Desk"), None),
        &HostDialect::Chrome.metadata_defaults(),
        Vec::new(),
    );
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "browser_name": "Chrome",
            "device_name": "Desk",
            "profile_name": "Default",
            "bookmarks": []
        })
    );
}
