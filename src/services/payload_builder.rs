//! Sync Request Builder: wraps flattened records and identification metadata
//! into one upload payload. No I/O and no validation beyond defaulting.

use crate::types::bookmark::FlatBookmarkRecord;
use crate::types::sync::{MetadataDefaults, SyncMetadata, SyncPayload};

pub fn build_payload(
    metadata: &SyncMetadata,
    defaults: &MetadataDefaults,
    records: Vec<FlatBookmarkRecord>,
) -> SyncPayload {
    SyncPayload {
        browser_name: or_default(&metadata.browser_name, &defaults.browser_name),
        device_name: or_default(&metadata.device_name, &defaults.device_name),
        profile_name: or_default(&metadata.profile_name, &defaults.profile_name),
        bookmarks: records,
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
