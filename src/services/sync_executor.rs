//! Sync Executor.
//!
//! One invocation reads the live bookmark tree, flattens it, wraps it with
//! metadata and issues exactly one POST to the collector. Failures are returned
//! to the caller untouched: there is no retry and no partial upload.

use std::sync::Arc;

use serde_json::Value;

use crate::platform::host::{Host, HttpRequest};
use crate::services::payload_builder::build_payload;
use crate::services::tree_flattener::flatten;
use crate::types::errors::SyncError;
use crate::types::sync::{MetadataDefaults, SyncEndpoint, SyncMetadata, SyncPayload};

pub struct SyncExecutor {
    host: Arc<dyn Host>,
    endpoint: SyncEndpoint,
    defaults: MetadataDefaults,
}

impl SyncExecutor {
    pub fn new(host: Arc<dyn Host>, endpoint: SyncEndpoint, defaults: MetadataDefaults) -> Self {
        Self {
            host,
            endpoint,
            defaults,
        }
    }

    pub fn defaults(&self) -> &MetadataDefaults {
        &self.defaults
    }

    /// Builds the payload from the current tree without uploading it.
    pub async fn prepare(&self, metadata: &SyncMetadata) -> Result<SyncPayload, SyncError> {
        let tree = self.host.get_bookmark_tree().await?;
        let records = flatten(&tree)?;
        Ok(build_payload(metadata, &self.defaults, records))
    }

    /// Runs one sync and returns the collector's parsed JSON response.
    pub async fn sync(&self, metadata: &SyncMetadata) -> Result<Value, SyncError> {
        let payload = self.prepare(metadata).await?;
        let count = payload.bookmarks.len();
        tracing::info!(
            bookmarks = count,
            browser = %payload.browser_name,
            device = %payload.device_name,
            profile = %payload.profile_name,
            "uploading bookmarks"
        );

        let request = self.request_for(&payload)?;
        let response = self.host.http_post(request).await.map_err(|e| {
            tracing::error!(error = %e, endpoint = %self.endpoint.url, "bookmark upload failed");
            e
        })?;

        if !response.is_success() {
            tracing::error!(status = response.status, "collector rejected bookmark upload");
            return Err(SyncError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }

        let result: Value = serde_json::from_str(&response.body)
            .map_err(|e| SyncError::ResponseParse(e.to_string()))?;
        tracing::info!(
            bookmarks = count,
            inserted = result.get("inserted").and_then(serde_json::Value::as_i64),
            updated = result.get("updated").and_then(serde_json::Value::as_i64),
            browser_id = result.get("browser_id").and_then(serde_json::Value::as_i64),
            "sync result: {}",
            result
        );
        Ok(result)
    }

    fn request_for(&self, payload: &SyncPayload) -> Result<HttpRequest, SyncError> {
        let body = serde_json::to_vec(payload).map_err(|e| SyncError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            url: self.endpoint.url.clone(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (
                    "Authorization".to_string(),
                    self.endpoint.authorization().to_string(),
                ),
            ],
            body,
        })
    }
}
