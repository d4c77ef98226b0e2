use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sync::SyncMetadata;

pub const SYNC_BOOKMARKS: &str = "SYNC_BOOKMARKS";
pub const UPDATE_SETTINGS: &str = "UPDATE_SETTINGS";

/// A recognised message on the in-process message bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Sync now, with caller-supplied metadata.
    SyncBookmarks(SyncMetadata),
    /// Settings changed; reconcile the auto-sync timer.
    UpdateSettings,
}

impl Message {
    /// Classifies a raw message. Returns `None` for anything the router ignores:
    /// non-objects, a missing `type`, or an unknown `type`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.get("type").and_then(Value::as_str)? {
            SYNC_BOOKMARKS => Some(Message::SyncBookmarks(SyncMetadata::from_message_meta(
                value.get("meta"),
            ))),
            UPDATE_SETTINGS => Some(Message::UpdateSettings),
            _ => None,
        }
    }
}

/// Reply sent back to the component that posted a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageReply {
    pub fn ok() -> Self {
        Self {
            ok: true,
            result: None,
            error: None,
        }
    }

    pub fn with_result(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}
