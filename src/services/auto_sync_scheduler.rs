//! Auto-Sync Scheduler.
//!
//! Reads the persisted on/off switch and interval, then installs or removes the
//! single named recurring timer to match. Safe to call any number of times:
//! installing replaces the same-named timer and clearing a missing one is a no-op.

use std::sync::Arc;

use crate::platform::host::Host;
use crate::types::config::TimerConfig;
use crate::types::errors::SettingsError;
use crate::types::settings::{AutoSyncSettings, AUTO_SYNC_KEYS};

/// What `reconcile` left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSyncState {
    Disabled,
    Enabled { period_minutes: u64 },
}

pub struct AutoSyncScheduler {
    host: Arc<dyn Host>,
    timer: TimerConfig,
}

impl AutoSyncScheduler {
    pub fn new(host: Arc<dyn Host>, timer: TimerConfig) -> Self {
        Self { host, timer }
    }

    pub fn timer_name(&self) -> &str {
        &self.timer.name
    }

    /// Current effective settings, sanitized.
    pub async fn read_settings(&self) -> Result<AutoSyncSettings, SettingsError> {
        let stored = self.host.get_settings(&AUTO_SYNC_KEYS).await?;
        Ok(AutoSyncSettings::from_settings(
            &stored,
            self.timer.default_interval_minutes,
        ))
    }

    pub async fn reconcile(&self) -> Result<AutoSyncState, SettingsError> {
        let settings = self.read_settings().await?;

        if !settings.enabled {
            let removed = self.host.clear_timer(&self.timer.name).await;
            tracing::info!(alarm = %self.timer.name, removed, "auto sync disabled");
            return Ok(AutoSyncState::Disabled);
        }

        self.host
            .create_timer(&self.timer.name, settings.interval_minutes)
            .await;
        tracing::info!(
            alarm = %self.timer.name,
            period_minutes = settings.interval_minutes,
            "auto sync enabled"
        );
        Ok(AutoSyncState::Enabled {
            period_minutes: settings.interval_minutes,
        })
    }
}
