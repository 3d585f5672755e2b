use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::crossterm::event::KeyEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::engine::EngineEvent;

/// Everything the panel loop reacts to, in arrival order.
#[derive(Debug)]
pub enum Event {
    /// Time to redraw.
    Render,
    Key(KeyEvent),
    /// The next draw picks up the new size.
    Resize,
    /// Progress tick, health result or settled call.
    Engine(EngineEvent),
    /// Every source is gone.
    Quit,
}

/// Merges terminal input, engine messages and the frame timer into one
/// stream so the panel state has a single writer.
pub struct EventHandler {
    rx: UnboundedReceiver<Event>,
    pump: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(render_rate: Duration, engine_rx: UnboundedReceiver<EngineEvent>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let pump = tokio::spawn(pump_events(tx, engine_rx, render_rate));
        Self { rx, pump }
    }

    /// Next event; `Event::Quit` once the pump has stopped.
    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Quit)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Only key presses and resizes matter; releases, repeats, mouse and focus
/// changes are dropped.
fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        TermEvent::Resize(..) => Some(Event::Resize),
        _ => None,
    }
}

async fn pump_events(
    tx: UnboundedSender<Event>,
    mut engine_rx: UnboundedReceiver<EngineEvent>,
    render_rate: Duration,
) {
    let mut terminal = EventStream::new();
    let mut frames = tokio::time::interval(render_rate);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut engine_open = true;

    loop {
        let event = tokio::select! {
            input = terminal.next() => match input {
                Some(Ok(raw)) => translate(raw),
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Terminal input error");
                    None
                }
                None => return,
            },
            engine = engine_rx.recv(), if engine_open => match engine {
                Some(event) => Some(Event::Engine(event)),
                None => {
                    engine_open = false;
                    None
                }
            },
            _ = frames.tick() => Some(Event::Render),
        };

        if let Some(event) = event {
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}
