//! Process-wide panel state shared by the dispatcher and the presenter.
//!
//! Owned by the panel loop and passed by reference; only that loop mutates it.

use tokio::task::JoinHandle;

/// Where a dispatch currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Controls disabled; nothing in flight.
    Idle,
    /// Controls enabled; a click would dispatch.
    Armed,
    InFlight,
}

/// Handle to the presenter's repeating task. Dropping it aborts the task.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn new(generation: u64, handle: JoinHandle<()>) -> Self {
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    /// Single-flight flag: at most one action is in flight.
    in_flight: bool,
    ticker: Option<Ticker>,
    controls_enabled: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight {
            Phase::InFlight
        } else if self.controls_enabled {
            Phase::Armed
        } else {
            Phase::Idle
        }
    }

    /// Install a new ticker, aborting any previous one first.
    pub fn replace_ticker(&mut self, ticker: Ticker) {
        self.cancel_ticker();
        self.ticker = Some(ticker);
    }

    /// Abort the active ticker, if any.
    pub fn cancel_ticker(&mut self) {
        self.ticker = None;
    }

    pub fn ticker_generation(&self) -> Option<u64> {
        self.ticker.as_ref().map(Ticker::generation)
    }

    #[cfg(test)]
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }
}
