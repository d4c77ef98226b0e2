use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroizing;

use super::bookmark::FlatBookmarkRecord;
use super::settings::{SettingsMap, BROWSER_NAME, DEVICE_NAME, PROFILE_NAME};

pub const DEFAULT_DEVICE_NAME: &str = "Laptop Lokal";
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Device/browser/profile identification attached to every upload.
///
/// Each field is optional; missing or empty fields take the defaults
/// from [`MetadataDefaults`] independently of each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncMetadata {
    #[serde(default)]
    pub browser_name: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub profile_name: Option<String>,
}

impl SyncMetadata {
    /// Reads the three identification labels out of persisted settings.
    ///
    /// Only non-empty string values are taken; anything else is left unset.
    pub fn from_settings(settings: &SettingsMap) -> Self {
        let label = |key: &str| {
            settings
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            browser_name: label(BROWSER_NAME),
            device_name: label(DEVICE_NAME),
            profile_name: label(PROFILE_NAME),
        }
    }

    /// Lenient read of the `meta` object of a message; non-string fields are ignored.
    pub fn from_message_meta(meta: Option<&Value>) -> Self {
        let field = |key: &str| {
            meta.and_then(|m| m.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            browser_name: field(BROWSER_NAME),
            device_name: field(DEVICE_NAME),
            profile_name: field(PROFILE_NAME),
        }
    }
}

/// Labels used when the caller leaves a metadata field empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDefaults {
    pub browser_name: String,
    pub device_name: String,
    pub profile_name: String,
}

impl MetadataDefaults {
    pub fn for_browser(browser_name: &str) -> Self {
        Self {
            browser_name: browser_name.to_string(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
        }
    }
}

/// The JSON body of one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub browser_name: String,
    pub device_name: String,
    pub profile_name: String,
    pub bookmarks: Vec<FlatBookmarkRecord>,
}

/// Where uploads go and the bearer credential that authorizes them.
#[derive(Debug, Clone)]
pub struct SyncEndpoint {
    pub url: String,
    pub token: Zeroizing<String>,
}

impl SyncEndpoint {
    pub fn new(url: &str, token: &str) -> Self {
        Self {
            url: url.to_string(),
            token: Zeroizing::new(token.to_string()),
        }
    }

    pub fn authorization(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("Bearer {}", self.token.as_str()))
    }
}
