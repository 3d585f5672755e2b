//! Client side of the sync service.
//!
//! `Backend` is the seam between the panel engine and the network: the
//! engine only ever talks to a `Backend`, so tests swap in a scripted fake.

pub mod http;
pub mod types;

#[cfg(test)]
pub mod fake;

use std::future::Future;

use crate::error::PanelError;

pub use http::HttpBackend;
pub use types::{Card, HealthReport, Payload, ScanReport, SyncReport};

/// Remote operations the panel can invoke.
///
/// Futures are `Send` so calls can run on spawned tasks while the panel loop
/// keeps handling input.
pub trait Backend: Send + Sync + 'static {
    /// `GET /api/health`
    fn health(&self) -> impl Future<Output = Result<HealthReport, PanelError>> + Send;

    /// `POST /api/scan`
    fn scan(&self, payload: &Payload) -> impl Future<Output = Result<ScanReport, PanelError>> + Send;

    /// `POST /api/sync`
    fn sync(&self, payload: &Payload) -> impl Future<Output = Result<SyncReport, PanelError>> + Send;
}
