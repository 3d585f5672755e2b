//! Interactive control panel.

mod action;
mod app;
mod event;
mod terminal;
pub mod components;
pub mod theme;

use std::sync::Arc;

use crate::api::HttpBackend;
use crate::config::PanelConfig;
use crate::error::PanelError;

/// Launch the interactive panel against the configured service.
///
/// Creates a tokio runtime and runs the async TUI event loop.
/// Terminal is initialized with alternate screen and raw mode,
/// and restored on exit (including on panic).
pub fn launch_tui(config: &PanelConfig) -> Result<(), PanelError> {
    let backend = HttpBackend::new(config.server_url()?, config.health_timeout())?;
    tracing::info!(server = %config.server, "Launching panel");
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run_app(Arc::new(backend), config))
}
