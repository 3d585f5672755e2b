//! Request and response bodies of the sync service.

use serde::{Deserialize, Serialize};

/// Request body for `/api/scan` and `/api/sync`.
///
/// An absent `vault` tells the service to use its default vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

/// One flashcard as reported by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
    pub deck: String,
    pub front: String,
    pub back: String,
}

/// `GET /api/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub anki_online: bool,
}

/// `POST /api/scan`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanReport {
    pub unique_cards: u64,
    pub duplicate_cards: u64,
    pub cards: Vec<Card>,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub returned_cards: u64,
}

/// `POST /api/sync`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SyncReport {
    pub added: u64,
    pub updated: u64,
}

/// Error body sent with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}
