//! Event router for the agent's host notifications.
//!
//! Stateless dispatch: lifecycle events and `UPDATE_SETTINGS` reconcile the
//! auto-sync timer, timer fires and `SYNC_BOOKMARKS` run a sync. Timer-driven
//! outcomes are only logged; message-driven outcomes go back to the sender.

use std::sync::Arc;

use serde_json::Value;

use crate::platform::host::{Host, HostEvent, LifecycleEvent};
use crate::services::auto_sync_scheduler::AutoSyncScheduler;
use crate::services::sync_executor::SyncExecutor;
use crate::types::errors::{unpack_error, SyncError};
use crate::types::message::{Message, MessageReply};
use crate::types::settings::METADATA_KEYS;
use crate::types::sync::SyncMetadata;

pub struct EventRouter {
    host: Arc<dyn Host>,
    executor: SyncExecutor,
    scheduler: AutoSyncScheduler,
}

impl EventRouter {
    pub fn new(host: Arc<dyn Host>, executor: SyncExecutor, scheduler: AutoSyncScheduler) -> Self {
        Self {
            host,
            executor,
            scheduler,
        }
    }

    pub fn executor(&self) -> &SyncExecutor {
        &self.executor
    }

    pub fn scheduler(&self) -> &AutoSyncScheduler {
        &self.scheduler
    }

    /// Routes one host event. Message replies are sent through the event's channel.
    pub async fn dispatch(&self, event: HostEvent) {
        match event {
            HostEvent::Lifecycle(lifecycle) => self.on_lifecycle(lifecycle).await,
            HostEvent::TimerFired(name) => self.on_timer_fired(&name).await,
            HostEvent::Message { message, reply } => {
                if let Some(response) = self.on_message(&message).await {
                    if let Some(reply) = reply {
                        if reply.send(response).is_err() {
                            tracing::warn!("message sender went away before the reply");
                        }
                    }
                }
            }
        }
    }

    pub async fn on_lifecycle(&self, event: LifecycleEvent) {
        tracing::info!(?event, "lifecycle event");
        if let Err(e) = self.scheduler.reconcile().await {
            tracing::error!(error = %e, "auto sync setup failed");
        }
    }

    pub async fn on_timer_fired(&self, name: &str) {
        if name != self.scheduler.timer_name() {
            return;
        }
        tracing::info!(alarm = %name, "auto sync alarm fired, starting sync");

        match self.sync_from_settings().await {
            Ok(result) => tracing::info!(result = %result, "auto sync succeeded"),
            Err(e) => tracing::error!(error = %unpack_error(&e), "auto sync failed"),
        }
    }

    /// Handles a bus message; `None` means the message is not for this router.
    pub async fn on_message(&self, message: &Value) -> Option<MessageReply> {
        let message = Message::from_value(message)?;

        let reply = match message {
            Message::SyncBookmarks(metadata) => match self.executor.sync(&metadata).await {
                Ok(result) => MessageReply::with_result(result),
                Err(e) => {
                    tracing::error!(error = %e, "requested sync failed");
                    MessageReply::failed(e.to_string())
                }
            },
            Message::UpdateSettings => match self.scheduler.reconcile().await {
                Ok(_) => MessageReply::ok(),
                Err(e) => {
                    tracing::error!(error = %e, "auto sync reconfiguration failed");
                    MessageReply::failed(e.to_string())
                }
            },
        };
        Some(reply)
    }

    async fn sync_from_settings(&self) -> Result<Value, SyncError> {
        let stored = self.host.get_settings(&METADATA_KEYS).await?;
        let metadata = SyncMetadata::from_settings(&stored);
        self.executor.sync(&metadata).await
    }
}
