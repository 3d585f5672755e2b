//! Action orchestration for the panel.
//!
//! All state here is owned by one loop (the TUI or a headless command) and
//! mutated only from it. Timers and remote calls run on spawned tasks and
//! report back through `EngineEvent`s on an unbounded channel.

pub mod action;
pub mod dispatch;
pub mod health;
pub mod payload;
pub mod progress;
pub mod results;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::api::Backend;

pub use action::Action;
pub use dispatch::{Dispatch, Dispatcher, Outcome, Settled, Settlement};
pub use health::{HealthCheck, HealthIndicator, HealthMonitor, HealthStatus};
pub use progress::ProgressPresenter;
pub use results::ResultTable;
pub use session::{Phase, SessionState};

/// Messages from engine tasks back to the owning loop.
#[derive(Debug)]
pub enum EngineEvent {
    /// The presenter's ticker fired.
    ProgressTick { generation: u64 },
    /// A health poll finished.
    Health(HealthCheck),
    /// A dispatched call finished.
    Settled(Settled),
}

/// Session, presenter, dispatcher and result table wired together.
pub struct Panel<B> {
    session: SessionState,
    presenter: ProgressPresenter,
    dispatcher: Dispatcher<B>,
    results: ResultTable,
}

impl<B: Backend> Panel<B> {
    pub fn new(
        backend: Arc<B>,
        progress_interval: Duration,
        events: UnboundedSender<EngineEvent>,
    ) -> Self {
        Self {
            session: SessionState::new(),
            presenter: ProgressPresenter::new(progress_interval, events.clone()),
            dispatcher: Dispatcher::new(backend, events),
            results: ResultTable::new(),
        }
    }

    /// Recompute control enablement from the raw vault input.
    pub fn on_vault_input(&mut self, text: &str) {
        self.session.set_controls_enabled(!text.is_empty());
    }

    /// Enable controls unconditionally (no input field to gate them).
    pub fn enable_controls(&mut self) {
        self.session.set_controls_enabled(true);
    }

    pub fn trigger(&mut self, action: Action, vault_input: &str) -> Dispatch {
        self.dispatcher
            .dispatch(&mut self.session, &mut self.presenter, action, vault_input)
    }

    pub fn on_progress_tick(&mut self, generation: u64) -> bool {
        self.presenter.on_tick(&self.session, generation)
    }

    pub fn settle(&mut self, settled: Settled) -> Settlement {
        self.dispatcher.settle(
            &mut self.session,
            &mut self.presenter,
            &mut self.results,
            settled,
        )
    }

    pub fn status_text(&self) -> &str {
        self.presenter.text()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn results(&self) -> &ResultTable {
        &self.results
    }
}
