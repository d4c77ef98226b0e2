//! Host capability set.
//!
//! Everything the sync core needs from its surroundings sits behind [`Host`]:
//! the bookmark tree, the persisted settings store, the named-timer service and
//! raw HTTP. Notifications flowing the other way (timer fires, messages,
//! lifecycle) arrive as [`HostEvent`]s on a channel.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::types::bookmark::BookmarkNode;
use crate::types::config::HostDialect;
use crate::types::errors::{SettingsError, SyncError};
use crate::types::message::MessageReply;
use crate::types::settings::SettingsMap;

/// One outbound POST, fully prepared by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body text of a response, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A browser profile on disk that can produce its bookmark tree on demand.
pub trait BookmarkSource: Send + Sync {
    fn read_tree(&self) -> Result<Vec<BookmarkNode>, SyncError>;
    fn location(&self) -> &Path;
}

#[async_trait]
pub trait Host: Send + Sync {
    fn dialect(&self) -> HostDialect;
    async fn get_bookmark_tree(&self) -> Result<Vec<BookmarkNode>, SyncError>;
    /// Returns only the requested keys that are present in the store.
    async fn get_settings(&self, keys: &[&str]) -> Result<SettingsMap, SettingsError>;
    async fn set_settings(&self, values: SettingsMap) -> Result<(), SettingsError>;
    /// Removes the named timer; `false` when none existed.
    async fn clear_timer(&self, name: &str) -> bool;
    /// Installs a recurring timer, replacing any timer with the same name.
    async fn create_timer(&self, name: &str, period_minutes: u64);
    async fn http_post(&self, request: HttpRequest) -> Result<HttpResponse, SyncError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Installed,
    Startup,
}

/// A notification delivered by the host to the event router.
#[derive(Debug)]
pub enum HostEvent {
    Lifecycle(LifecycleEvent),
    TimerFired(String),
    Message {
        message: Value,
        /// Where the reply goes; `None` when the sender does not wait for one.
        reply: Option<oneshot::Sender<MessageReply>>,
    },
}
