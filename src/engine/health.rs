//! Periodic health polling and the online/offline indicator.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::EngineEvent;
use crate::api::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Online,
    Offline,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Online => "online",
            HealthStatus::Offline => "offline",
        }
    }
}

/// Result of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthCheck {
    pub status: HealthStatus,
    pub checked_at: DateTime<Local>,
}

/// Ask the service whether Anki is reachable.
///
/// Every failure (transport, status, body) maps to `Offline`; nothing is
/// surfaced beyond the indicator.
pub async fn poll<B: Backend>(backend: &B) -> HealthStatus {
    match backend.health().await {
        Ok(report) if report.anki_online => HealthStatus::Online,
        Ok(_) => HealthStatus::Offline,
        Err(e) => {
            tracing::debug!(error = %e, "Health poll failed");
            HealthStatus::Offline
        }
    }
}

/// Repeating health poll. Polls immediately, then every `period`.
///
/// Runs independently of any in-flight action. Dropping the monitor stops it.
pub struct HealthMonitor {
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    pub fn init<B: Backend>(
        backend: Arc<B>,
        period: Duration,
        events: UnboundedSender<EngineEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let status = poll(backend.as_ref()).await;
                let check = HealthCheck {
                    status,
                    checked_at: Local::now(),
                };
                if events.send(EngineEvent::Health(check)).is_err() {
                    return;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// What the status indicator shows: nothing until the first poll lands.
#[derive(Debug, Clone, Default)]
pub struct HealthIndicator {
    last: Option<HealthCheck>,
}

impl HealthIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a poll result. Returns true when the status changed.
    pub fn apply(&mut self, check: HealthCheck) -> bool {
        let changed = self.status() != Some(check.status);
        if changed {
            tracing::info!(status = check.status.label(), "Backend health changed");
        }
        self.last = Some(check);
        changed
    }

    pub fn status(&self) -> Option<HealthStatus> {
        self.last.map(|c| c.status)
    }

    pub fn label(&self) -> String {
        match &self.last {
            Some(check) => format!(
                "{} ({})",
                check.status.label(),
                check.checked_at.format("%H:%M:%S")
            ),
            None => "checking…".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeBackend, Reply};
    use crate::api::HealthReport;
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::Instant;

    async fn next_check(rx: &mut UnboundedReceiver<EngineEvent>) -> HealthCheck {
        match rx.recv().await {
            Some(EngineEvent::Health(check)) => check,
            other => panic!("expected health event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn online_report_is_online() {
        let backend = FakeBackend::new();
        assert_eq!(poll(&backend).await, HealthStatus::Online);
    }

    #[tokio::test]
    async fn anki_down_is_offline() {
        let backend = FakeBackend::new();
        backend.set_health(Reply::Ok(HealthReport { anki_online: false }));
        assert_eq!(poll(&backend).await, HealthStatus::Offline);
    }

    #[tokio::test]
    async fn http_failure_is_offline() {
        let backend = FakeBackend::new();
        backend.set_health(Reply::Remote("Internal Server Error".into()));
        assert_eq!(poll(&backend).await, HealthStatus::Offline);
    }

    #[tokio::test]
    async fn transport_failure_is_offline() {
        let backend = FakeBackend::new();
        backend.set_health(Reply::Unreachable);
        assert_eq!(poll(&backend).await, HealthStatus::Offline);
    }

    #[tokio::test]
    async fn malformed_body_is_offline() {
        let backend = FakeBackend::new();
        backend.set_health(Reply::Malformed);
        assert_eq!(poll(&backend).await, HealthStatus::Offline);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_immediately_then_every_period() {
        let backend = Arc::new(FakeBackend::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let period = Duration::from_millis(8000);

        let started = Instant::now();
        let _monitor = HealthMonitor::init(Arc::clone(&backend), period, tx);

        let first = next_check(&mut rx).await;
        assert_eq!(first.status, HealthStatus::Online);
        assert_eq!(started.elapsed(), Duration::ZERO);

        backend.set_health(Reply::Unreachable);
        let second = next_check(&mut rx).await;
        assert_eq!(second.status, HealthStatus::Offline);
        assert_eq!(started.elapsed(), period);

        next_check(&mut rx).await;
        assert_eq!(started.elapsed(), period * 2);
        assert_eq!(backend.health_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_monitor_stops_polling() {
        let backend = Arc::new(FakeBackend::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let monitor = HealthMonitor::init(Arc::clone(&backend), Duration::from_secs(8), tx);
        next_check(&mut rx).await;
        drop(monitor);

        // the task held the only sender, so the channel closes once it is gone
        assert!(rx.recv().await.is_none());
        assert_eq!(backend.health_calls(), 1);
    }

    #[test]
    fn indicator_reports_changes_only() {
        let mut indicator = HealthIndicator::new();
        assert_eq!(indicator.status(), None);
        assert_eq!(indicator.label(), "checking…");

        let online = HealthCheck {
            status: HealthStatus::Online,
            checked_at: Local::now(),
        };
        assert!(indicator.apply(online));
        assert!(!indicator.apply(online));
        assert!(indicator.label().starts_with("online ("));

        let offline = HealthCheck {
            status: HealthStatus::Offline,
            ..online
        };
        assert!(indicator.apply(offline));
        assert_eq!(indicator.status(), Some(HealthStatus::Offline));
    }
}
