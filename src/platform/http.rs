//! Outbound HTTP for the native host, on reqwest.

use std::time::Duration;

use crate::platform::host::{HttpRequest, HttpResponse};
use crate::types::errors::{unpack_error, SyncError};

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    /// Accept self-signed collector certificates.
    pub accept_invalid_certs: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(options: &HttpOptions) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(|e| SyncError::Transport(unpack_error(&e)))?;
        Ok(Self { client })
    }

    /// Sends one POST and returns the raw status and body; never retries.
    pub async fn post(&self, request: HttpRequest) -> Result<HttpResponse, SyncError> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| SyncError::Transport(unpack_error(&e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Transport(unpack_error(&e)))?;

        Ok(HttpResponse { status, body })
    }
}
