//! Single-flight action dispatch.
//!
//! `dispatch` gates on the session, starts the presenter and spawns the
//! remote call; the call reports back with exactly one `Settled` event.
//! `settle` turns that event into the final status text and always stops
//! the presenter, so the session never stays in flight after a settlement.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use super::action::Action;
use super::payload::payload_for;
use super::progress::ProgressPresenter;
use super::results::ResultTable;
use super::session::SessionState;
use super::EngineEvent;
use crate::api::{Backend, Payload, ScanReport, SyncReport};
use crate::error::PanelError;

/// Status text used when a failure renders to nothing.
pub const GENERIC_FAILURE: &str = "failed";

/// Why a trigger was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    InFlight,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Started(Action),
    Ignored(Ignored),
}

/// Successful result of a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Scanned(ScanReport),
    Synced { report: SyncReport, dry_run: bool },
}

impl Outcome {
    pub fn status_text(&self) -> String {
        match self {
            Outcome::Scanned(report) => {
                let mut text = format!(
                    "new {}, dupes {}",
                    report.unique_cards, report.duplicate_cards
                );
                if report.truncated {
                    text.push_str(&format!(" (showing {})", report.returned_cards));
                }
                text
            }
            Outcome::Synced { report, dry_run } => {
                let label = if *dry_run { "dry-run" } else { "synced" };
                format!("{}: {} add, {} update", label, report.added, report.updated)
            }
        }
    }
}

/// Sent once per dispatched call.
#[derive(Debug)]
pub struct Settled {
    pub action: Action,
    pub result: Result<Outcome, PanelError>,
}

/// What the panel shows after a call settles.
#[derive(Debug)]
pub struct Settlement {
    pub action: Action,
    pub status: String,
    pub result: Result<Outcome, PanelError>,
}

impl Settlement {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Dispatcher<B> {
    backend: Arc<B>,
    events: UnboundedSender<EngineEvent>,
}

impl<B: Backend> Dispatcher<B> {
    pub fn new(backend: Arc<B>, events: UnboundedSender<EngineEvent>) -> Self {
        Self { backend, events }
    }

    pub fn dispatch(
        &self,
        session: &mut SessionState,
        presenter: &mut ProgressPresenter,
        action: Action,
        vault_input: &str,
    ) -> Dispatch {
        if session.is_in_flight() {
            tracing::debug!(%action, "Ignoring trigger: another action is in flight");
            return Dispatch::Ignored(Ignored::InFlight);
        }
        if !session.controls_enabled() {
            tracing::debug!(%action, "Ignoring trigger: controls disabled");
            return Dispatch::Ignored(Ignored::Disabled);
        }

        presenter.start(session);

        let payload = payload_for(action, vault_input);
        tracing::debug!(%action, vault = ?payload.vault, "Dispatching action");

        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            // inner task so a panicking call still settles
            let task = tokio::spawn(async move { call(backend.as_ref(), action, &payload).await });
            let result = task
                .await
                .unwrap_or_else(|e| Err(PanelError::Internal(format!("{} call aborted: {}", action, e))));
            // a closed channel means the panel is shutting down
            let _ = events.send(EngineEvent::Settled(Settled { action, result }));
        });

        Dispatch::Started(action)
    }

    /// Finish a dispatched call: update results, stop the presenter.
    pub fn settle(
        &self,
        session: &mut SessionState,
        presenter: &mut ProgressPresenter,
        results: &mut ResultTable,
        settled: Settled,
    ) -> Settlement {
        let Settled { action, result } = settled;
        let status = match &result {
            Ok(outcome) => outcome.status_text(),
            Err(e) => failure_text(e),
        };

        match &result {
            Ok(Outcome::Scanned(report)) => {
                results.render(Some(&report.cards));
                tracing::info!(%action, status = %status, "Action finished");
            }
            Ok(Outcome::Synced { .. }) => {
                tracing::info!(%action, status = %status, "Action finished");
            }
            Err(e) => {
                tracing::warn!(%action, error = %e, "Action failed");
            }
        }

        presenter.stop(session, status.clone());
        Settlement {
            action,
            status,
            result,
        }
    }
}

async fn call<B: Backend>(
    backend: &B,
    action: Action,
    payload: &Payload,
) -> Result<Outcome, PanelError> {
    match action {
        Action::Scan => backend.scan(payload).await.map(Outcome::Scanned),
        Action::Sync | Action::DryRun => {
            backend.sync(payload).await.map(|report| Outcome::Synced {
                report,
                dry_run: action.is_dry_run(),
            })
        }
    }
}

fn failure_text(err: &PanelError) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        text
    }
}
