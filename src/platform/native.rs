//! Native host: a browser profile on disk, a JSON settings file, tokio alarms
//! and reqwest, presented through the [`Host`] capability trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::platform::alarms::AlarmService;
use crate::platform::host::{BookmarkSource, Host, HostEvent, HttpRequest, HttpResponse};
use crate::platform::http::HttpClient;
use crate::services::settings_store::{SettingsStore, SettingsStoreTrait};
use crate::types::bookmark::BookmarkNode;
use crate::types::config::HostDialect;
use crate::types::errors::{SettingsError, SyncError};
use crate::types::settings::SettingsMap;

pub struct NativeHost {
    dialect: HostDialect,
    bookmarks: Arc<dyn BookmarkSource>,
    settings: SettingsStore,
    alarms: AlarmService,
    http: HttpClient,
}

impl NativeHost {
    pub fn new(
        dialect: HostDialect,
        bookmarks: Arc<dyn BookmarkSource>,
        settings: SettingsStore,
        http: HttpClient,
        events: UnboundedSender<HostEvent>,
    ) -> Self {
        Self {
            dialect,
            bookmarks,
            settings,
            alarms: AlarmService::new(events),
            http,
        }
    }

    pub fn settings_store(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn alarms(&self) -> &AlarmService {
        &self.alarms
    }

    pub fn bookmark_source(&self) -> &dyn BookmarkSource {
        self.bookmarks.as_ref()
    }
}

#[async_trait]
impl Host for NativeHost {
    fn dialect(&self) -> HostDialect {
        self.dialect
    }

    async fn get_bookmark_tree(&self) -> Result<Vec<BookmarkNode>, SyncError> {
        let source = Arc::clone(&self.bookmarks);
        tokio::task::spawn_blocking(move || source.read_tree())
            .await
            .map_err(|e| SyncError::Host(format!("bookmark reader panicked: {}", e)))?
    }

    async fn get_settings(&self, keys: &[&str]) -> Result<SettingsMap, SettingsError> {
        self.settings.get(keys)
    }

    async fn set_settings(&self, values: SettingsMap) -> Result<(), SettingsError> {
        self.settings.set(values)
    }

    async fn clear_timer(&self, name: &str) -> bool {
        self.alarms.clear(name)
    }

    async fn create_timer(&self, name: &str, period_minutes: u64) {
        self.alarms.create(name, period_minutes);
    }

    async fn http_post(&self, request: HttpRequest) -> Result<HttpResponse, SyncError> {
        self.http.post(request).await
    }
}
