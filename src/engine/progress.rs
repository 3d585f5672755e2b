//! Textual progress indicator shown while an action is in flight.
//!
//! `start` spawns a repeating task that emits `ProgressTick` events; the
//! panel loop feeds them back through `on_tick`. Each start bumps a
//! generation number and ticks from older generations are ignored, so a
//! tick that was already queued when `stop` ran changes nothing.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::session::{SessionState, Ticker};
use super::EngineEvent;

pub const PROGRESS_GLYPH: char = '▪';
/// Number of distinct bar lengths before the animation wraps.
pub const CYCLE: usize = 12;
pub const IDLE_TEXT: &str = "ready";

pub struct ProgressPresenter {
    interval: Duration,
    events: UnboundedSender<EngineEvent>,
    counter: usize,
    generation: u64,
    text: String,
}

impl ProgressPresenter {
    pub fn new(interval: Duration, events: UnboundedSender<EngineEvent>) -> Self {
        Self {
            interval,
            events,
            counter: 0,
            generation: 0,
            text: IDLE_TEXT.to_string(),
        }
    }

    /// Mark in-flight and restart the animation from a single glyph.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(&mut self, session: &mut SessionState) {
        session.cancel_ticker();
        session.set_in_flight(true);
        self.counter = 0;
        self.render_bar();

        self.generation += 1;
        let handle = spawn_ticker(self.interval, self.generation, self.events.clone());
        session.replace_ticker(Ticker::new(self.generation, handle));
    }

    /// Advance one step. Returns false for ticks of a cancelled generation.
    pub fn on_tick(&mut self, session: &SessionState, generation: u64) -> bool {
        if session.ticker_generation() != Some(generation) {
            return false;
        }
        self.counter = (self.counter + 1) % CYCLE;
        self.render_bar();
        true
    }

    /// Cancel the animation, show `final_text`, and clear the in-flight flag.
    pub fn stop(&mut self, session: &mut SessionState, final_text: impl Into<String>) {
        session.cancel_ticker();
        self.text = final_text.into();
        session.set_in_flight(false);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn render_bar(&mut self) {
        self.text = std::iter::repeat(PROGRESS_GLYPH)
            .take(self.counter + 1)
            .collect();
    }
}

fn spawn_ticker(
    period: Duration,
    generation: u64,
    events: UnboundedSender<EngineEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        // first tick one period after start; start() already drew the first glyph
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if events.send(EngineEvent::ProgressTick { generation }).is_err() {
                return;
            }
        }
    })
}
