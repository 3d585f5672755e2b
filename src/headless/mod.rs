//! One-shot commands that drive the panel engine without a terminal UI.

pub mod report;

use std::sync::Arc;
use std::time::Duration;

use indicatif::ProgressBar;
use tokio::sync::mpsc;

use crate::api::{Backend, HttpBackend};
use crate::config::PanelConfig;
use crate::engine::health::{self, HealthStatus};
use crate::engine::{Action, Dispatch, EngineEvent, Outcome, Panel, ResultTable, Settlement};
use crate::error::PanelError;
use crate::progress::create_action_spinner;

/// Dispatch `action` once and wait for it to settle.
///
/// Progress text is mirrored onto `spinner` as ticks arrive. Returns the
/// settlement and the table the renderer produced.
pub async fn run_once<B: Backend>(
    backend: Arc<B>,
    action: Action,
    vault_input: &str,
    progress_interval: Duration,
    spinner: &ProgressBar,
) -> (Settlement, ResultTable) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut panel = Panel::new(backend, progress_interval, tx);
    panel.enable_controls();

    if let Dispatch::Ignored(reason) = panel.trigger(action, vault_input) {
        let err = PanelError::Internal(format!("{} was not dispatched: {:?}", action, reason));
        return (internal_settlement(action, err), panel.results().clone());
    }
    spinner.set_message(panel.status_text().to_string());

    while let Some(event) = rx.recv().await {
        match event {
            EngineEvent::ProgressTick { generation } => {
                if panel.on_progress_tick(generation) {
                    spinner.set_message(panel.status_text().to_string());
                }
            }
            EngineEvent::Settled(settled) => {
                let settlement = panel.settle(settled);
                return (settlement, panel.results().clone());
            }
            EngineEvent::Health(_) => {}
        }
    }

    let err = PanelError::Internal(format!("{} ended without a result", action));
    (internal_settlement(action, err), panel.results().clone())
}

fn internal_settlement(action: Action, err: PanelError) -> Settlement {
    Settlement {
        action,
        status: err.to_string(),
        result: Err(err),
    }
}

/// `scan` / `sync` / `sync --dry-run`: print the status line and, for scans,
/// the card table. A failed action is returned as the error.
pub fn execute_action(
    action: Action,
    vault: Option<&str>,
    config: &PanelConfig,
    quiet: bool,
) -> Result<(), PanelError> {
    let backend = HttpBackend::new(config.server_url()?, config.health_timeout())?;
    tracing::info!(%action, server = %config.server, vault = ?vault, "Running action");

    let spinner = create_action_spinner(action.label(), quiet);
    let rt = tokio::runtime::Runtime::new()?;
    let (settlement, table) = rt.block_on(run_once(
        Arc::new(backend),
        action,
        vault.unwrap_or_default(),
        config.progress_interval(),
        &spinner,
    ));
    spinner.finish_and_clear();
    tracing::debug!(action = %settlement.action, succeeded = settlement.succeeded(), "Settled");

    match settlement.result {
        Ok(Outcome::Scanned(_)) => {
            println!("{}", settlement.status);
            print!("{}", report::format_table(&table));
            Ok(())
        }
        Ok(Outcome::Synced { .. }) => {
            println!("{}", settlement.status);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// `health`: one poll, printed as `online` or `offline`.
pub fn execute_health(config: &PanelConfig) -> Result<(), PanelError> {
    let backend = HttpBackend::new(config.server_url()?, config.health_timeout())?;
    let rt = tokio::runtime::Runtime::new()?;
    let status = rt.block_on(health::poll(&backend));
    println!("{}", status.label());
    match status {
        HealthStatus::Online => Ok(()),
        HealthStatus::Offline => Err(PanelError::Offline),
    }
}
