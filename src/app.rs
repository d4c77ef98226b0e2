//! App core for unibrowser-sync.
//!
//! Turns an [`AgentConfig`] into a ready event router: picks the bookmark
//! source for the configured browser, opens the settings store and HTTP
//! client, and hands the native host to the executor and scheduler.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::event_router::EventRouter;
use crate::platform;
use crate::platform::chromium::ChromiumProfile;
use crate::platform::host::{BookmarkSource, Host, HostEvent, LifecycleEvent};
use crate::platform::http::{HttpClient, HttpOptions};
use crate::platform::native::NativeHost;
use crate::services::auto_sync_scheduler::AutoSyncScheduler;
use crate::services::settings_store::{SettingsStore, SettingsStoreTrait};
use crate::services::sync_executor::SyncExecutor;
use crate::services::tree_flattener;
use crate::types::bookmark::FlatBookmarkRecord;
use crate::types::config::{AgentConfig, HostDialect};
use crate::types::errors::ConfigError;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<HostDialect>,
    pub profile: Option<PathBuf>,
}

/// The wired agent: native host, router, and the sending half of the event channel.
pub struct App {
    pub config: AgentConfig,
    pub host: Arc<NativeHost>,
    pub router: Arc<EventRouter>,
    events: UnboundedSender<HostEvent>,
}

impl App {
    /// Builds the agent. The returned receiver feeds [`crate::event_loop::run`].
    pub fn new(config: AgentConfig) -> Result<(Self, UnboundedReceiver<HostEvent>), BoxError> {
        let endpoint = config.sync_endpoint()?;
        let bookmarks = bookmark_source(&config)?;
        let settings = settings_store(&config);
        let http = HttpClient::new(&HttpOptions {
            timeout: Duration::from_secs(config.request_timeout_secs),
            accept_invalid_certs: config.accept_invalid_certs,
        })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let native = Arc::new(NativeHost::new(
            config.host,
            bookmarks,
            settings,
            http,
            tx.clone(),
        ));
        let host: Arc<dyn Host> = native.clone();

        let executor = SyncExecutor::new(
            Arc::clone(&host),
            endpoint,
            config.host.metadata_defaults(),
        );
        let scheduler = AutoSyncScheduler::new(Arc::clone(&host), config.timer_config());
        let router = Arc::new(EventRouter::new(host, executor, scheduler));

        tracing::info!(
            host = ?config.host,
            endpoint = %config.endpoint,
            bookmarks = %native.bookmark_source().location().display(),
            settings = %native.settings_store().path().display(),
            "agent initialized"
        );

        Ok((
            Self {
                config,
                host: native,
                router,
                events: tx,
            },
            rx,
        ))
    }

    pub fn event_sender(&self) -> UnboundedSender<HostEvent> {
        self.events.clone()
    }

    /// `Installed` until the settings file has been written once, `Startup` afterwards.
    pub fn initial_lifecycle(&self) -> LifecycleEvent {
        if self.host.settings_store().exists() {
            LifecycleEvent::Startup
        } else {
            LifecycleEvent::Installed
        }
    }
}

/// Loads the config file, then applies command-line overrides.
///
/// Without an explicit path, `<config_dir>/config.json` is used if present.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<AgentConfig, ConfigError> {
    let mut config = match path {
        Some(p) => AgentConfig::load(p, true)?,
        None => AgentConfig::load(&platform::get_config_dir().join("config.json"), false)?,
    };
    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(profile) = &overrides.profile {
        config.profile_path = Some(profile.clone());
    }
    Ok(config)
}

/// Opens the bookmark reader for the configured browser and profile.
pub fn bookmark_source(config: &AgentConfig) -> Result<Arc<dyn BookmarkSource>, BoxError> {
    match config.host {
        HostDialect::Chrome => {
            let dir = config
                .profile_path
                .clone()
                .unwrap_or_else(platform::default_chrome_profile_dir);
            Ok(Arc::new(ChromiumProfile::new(&dir)))
        }
        HostDialect::Firefox => firefox_source(config),
    }
}

#[cfg(feature = "firefox")]
fn firefox_source(config: &AgentConfig) -> Result<Arc<dyn BookmarkSource>, BoxError> {
    use crate::platform::firefox::FirefoxProfile;

    let profile = match &config.profile_path {
        Some(dir) => FirefoxProfile::new(dir),
        None => FirefoxProfile::discover(&platform::firefox_data_dir())?,
    };
    Ok(Arc::new(profile))
}

#[cfg(not(feature = "firefox"))]
fn firefox_source(_config: &AgentConfig) -> Result<Arc<dyn BookmarkSource>, BoxError> {
    Err(crate::types::errors::SyncError::Host("built without Firefox support".to_string()).into())
}

pub fn settings_store(config: &AgentConfig) -> SettingsStore {
    SettingsStore::new(config.settings_path.clone())
}

/// Reads and flattens the configured profile without uploading anything.
pub fn read_records(config: &AgentConfig) -> Result<Vec<FlatBookmarkRecord>, BoxError> {
    let source = bookmark_source(config)?;
    let tree = source.read_tree()?;
    Ok(tree_flattener::flatten(&tree)?)
}
