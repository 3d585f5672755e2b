use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PanelError;

/// Verbosity level controlling tracing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (info level)
    Normal,
    /// Verbose output (debug level)
    Verbose,
    /// Maximum output (trace level)
    Trace,
}

impl From<(bool, u8)> for Verbosity {
    /// Convert from (quiet_flag, verbose_count) to Verbosity.
    ///
    /// - quiet=true -> Quiet (regardless of verbose count)
    /// - verbose=0  -> Normal
    /// - verbose=1  -> Verbose
    /// - verbose=2+ -> Trace
    fn from((quiet, verbose_count): (bool, u8)) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            match verbose_count {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

impl Verbosity {
    /// Return the tracing filter string for this verbosity level.
    pub fn as_tracing_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";
pub const DEFAULT_HEALTH_INTERVAL_MS: u64 = 8000;
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 120;
pub const DEFAULT_HEALTH_TIMEOUT_MS: u64 = 5000;

/// Panel settings as stored in `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Base URL of the sync service.
    pub server: String,
    /// Prefill for the vault input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<String>,
    pub health_interval_ms: u64,
    pub progress_interval_ms: u64,
    pub health_timeout_ms: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            vault: None,
            health_interval_ms: DEFAULT_HEALTH_INTERVAL_MS,
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            health_timeout_ms: DEFAULT_HEALTH_TIMEOUT_MS,
        }
    }
}

impl PanelConfig {
    /// Check intervals and the server URL.
    ///
    /// Zero periods are rejected because `tokio::time::interval` panics on them.
    pub fn validate(&self) -> Result<(), PanelError> {
        for (key, value) in [
            ("health_interval_ms", self.health_interval_ms),
            ("progress_interval_ms", self.progress_interval_ms),
            ("health_timeout_ms", self.health_timeout_ms),
        ] {
            if value == 0 {
                return Err(PanelError::Config(format!("{} must be greater than zero", key)));
            }
        }
        self.server_url().map(|_| ())
    }

    /// Parse `server` as an absolute http(s) URL.
    pub fn server_url(&self) -> Result<Url, PanelError> {
        let url = Url::parse(&self.server).map_err(|e| PanelError::InvalidServerUrl {
            url: self.server.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PanelError::InvalidServerUrl {
                url: self.server.clone(),
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_millis(self.health_interval_ms)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }
}
