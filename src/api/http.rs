//! HTTP backend using an async `reqwest::Client`.
//!
//! Endpoints are resolved relative to the configured server URL, so a
//! service mounted under a path prefix (e.g. `https://host/panel/`) works.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::types::{ErrorDetail, HealthReport, Payload, ScanReport, SyncReport};
use super::Backend;
use crate::error::PanelError;

pub const SCAN_FALLBACK: &str = "scan failed";
pub const SYNC_FALLBACK: &str = "sync failed";
const HEALTH_FALLBACK: &str = "health check failed";

/// Sync-service client.
///
/// Action calls carry no timeout: a hung call keeps the panel busy until it
/// settles. Health checks are bounded by `health_timeout`.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    health_timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: Url, health_timeout: Duration) -> Result<Self, PanelError> {
        let client = Client::builder()
            .build()
            .map_err(|e| PanelError::Config(format!("Failed to create HTTP client: {}", e)))?;

        // Url::join drops the last segment unless the path ends with '/'
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(HttpBackend {
            client,
            base_url,
            health_timeout,
        })
    }

    /// Resolve a path such as `api/scan` against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, PanelError> {
        self.base_url
            .join(path)
            .map_err(|e| PanelError::InvalidServerUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    /// POST to `api/<name>`; `name` also labels decode failures.
    async fn post<T: DeserializeOwned>(
        &self,
        name: &str,
        payload: &impl Serialize,
        fallback: &str,
    ) -> Result<T, PanelError> {
        let url = self.endpoint(&format!("api/{}", name))?;
        tracing::debug!(%url, "POST");
        let request = self.client.post(url).json(payload);
        decode(request.send().await, name, fallback).await
    }
}

impl Backend for HttpBackend {
    async fn health(&self) -> Result<HealthReport, PanelError> {
        let url = self.endpoint("api/health")?;
        let request = self.client.get(url).timeout(self.health_timeout);
        decode(request.send().await, "health", HEALTH_FALLBACK).await
    }

    async fn scan(&self, payload: &Payload) -> Result<ScanReport, PanelError> {
        self.post("scan", payload, SCAN_FALLBACK).await
    }

    async fn sync(&self, payload: &Payload) -> Result<SyncReport, PanelError> {
        self.post("sync", payload, SYNC_FALLBACK).await
    }
}

/// Turn a sent request into a decoded body or a classified error.
async fn decode<T: DeserializeOwned>(
    sent: Result<reqwest::Response, reqwest::Error>,
    name: &str,
    fallback: &str,
) -> Result<T, PanelError> {
    let response = sent.map_err(|e| PanelError::Unreachable {
        reason: e.to_string(),
    })?;
    let status = response.status();
    let body = response.bytes().await.map_err(|e| PanelError::Unreachable {
        reason: e.to_string(),
    })?;
    decode_body(status, &body, name, fallback)
}

fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    name: &str,
    fallback: &str,
) -> Result<T, PanelError> {
    if !status.is_success() {
        tracing::debug!(%status, endpoint = name, "Service returned failure status");
        return Err(remote_failure(body, fallback));
    }

    serde_json::from_slice(body).map_err(|e| PanelError::MalformedResponse {
        endpoint: name.to_string(),
        reason: e.to_string(),
    })
}

/// Build the error for a non-success status from its body.
///
/// Uses the body's `detail` when it parses and is non-empty, else `fallback`.
pub fn remote_failure(body: &[u8], fallback: &str) -> PanelError {
    let detail = serde_json::from_slice::<ErrorDetail>(body).unwrap_or_default();
    let message = detail
        .detail
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    PanelError::Remote { message }
}
