//! Scripted backend for engine and TUI tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::Semaphore;

use super::types::{Card, HealthReport, Payload, ScanReport, SyncReport};
use super::Backend;
use crate::error::PanelError;

/// What the fake answers for one endpoint.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Remote(String),
    Unreachable,
    Malformed,
}

impl<T: Clone> Reply<T> {
    fn produce(&self, endpoint: &str) -> Result<T, PanelError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Remote(message) => Err(PanelError::Remote {
                message: message.clone(),
            }),
            Reply::Unreachable => Err(PanelError::Unreachable {
                reason: "connection refused".into(),
            }),
            Reply::Malformed => Err(PanelError::MalformedResponse {
                endpoint: endpoint.into(),
                reason: "missing field `added`".into(),
            }),
        }
    }
}

pub struct FakeBackend {
    health: Mutex<Reply<HealthReport>>,
    scan: Mutex<Reply<ScanReport>>,
    sync: Mutex<Reply<SyncReport>>,
    health_calls: AtomicUsize,
    action_calls: AtomicUsize,
    payloads: Mutex<Vec<Payload>>,
    /// When set, action calls wait for a permit before answering.
    gate: Option<Semaphore>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            health: Mutex::new(Reply::Ok(HealthReport { anki_online: true })),
            scan: Mutex::new(Reply::Ok(scan_report(3, 2, sample_cards(2), false, 0))),
            sync: Mutex::new(Reply::Ok(SyncReport {
                added: 4,
                updated: 1,
            })),
            health_calls: AtomicUsize::new(0),
            action_calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Hold every action call until `release` is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn set_health(&self, reply: Reply<HealthReport>) {
        *self.health.lock().unwrap() = reply;
    }

    pub fn set_scan(&self, reply: Reply<ScanReport>) {
        *self.scan.lock().unwrap() = reply;
    }

    pub fn set_sync(&self, reply: Reply<SyncReport>) {
        *self.sync.lock().unwrap() = reply;
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn action_calls(&self) -> usize {
        self.action_calls.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<Payload> {
        self.payloads.lock().unwrap().clone()
    }

    async fn enter(&self, payload: &Payload) {
        self.action_calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }
}

impl Backend for FakeBackend {
    async fn health(&self) -> Result<HealthReport, PanelError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.health.lock().unwrap().clone();
        reply.produce("health")
    }

    async fn scan(&self, payload: &Payload) -> Result<ScanReport, PanelError> {
        self.enter(payload).await;
        let reply = self.scan.lock().unwrap().clone();
        reply.produce("scan")
    }

    async fn sync(&self, payload: &Payload) -> Result<SyncReport, PanelError> {
        self.enter(payload).await;
        let reply = self.sync.lock().unwrap().clone();
        reply.produce("sync")
    }
}

pub fn sample_cards(n: usize) -> Vec<Card> {
    (1..=n)
        .map(|i| Card {
            deck: "03_sp26::math250".into(),
            front: format!("Question {}", i),
            back: format!("Answer {}", i),
        })
        .collect()
}

pub fn scan_report(
    unique: u64,
    duplicate: u64,
    cards: Vec<Card>,
    truncated: bool,
    returned: u64,
) -> ScanReport {
    ScanReport {
        unique_cards: unique,
        duplicate_cards: duplicate,
        cards,
        truncated,
        returned_cards: returned,
    }
}
