//! Component trait and TUI pane modules.
//!
//! Each pane implements the `Component` trait: it turns key presses into
//! `UiAction`s and renders itself.

pub mod action_bar;
pub mod results_view;
pub mod status_bar;
pub mod vault_input;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::crossterm::event::KeyEvent;

use super::action::UiAction;

/// Trait for TUI pane components.
///
/// Panes hold only view state. Everything they show is pushed in by the
/// App after an engine event, so there is no periodic update hook.
pub trait Component {
    /// Handle a key press event. Returns a `UiAction` to be processed
    /// by the App's main loop.
    ///
    /// Default: ignore the key event and return `UiAction::Noop`.
    fn handle_key_event(&mut self, key: KeyEvent) -> UiAction {
        let _ = key;
        UiAction::Noop
    }

    /// Render the component into the given area of the frame.
    fn render(&self, frame: &mut Frame, area: Rect);
}

#[cfg(test)]
pub(crate) fn test_key(code: ratatui::crossterm::event::KeyCode) -> KeyEvent {
    use ratatui::crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

#[cfg(test)]
pub(crate) fn ctrl_key(c: char) -> KeyEvent {
    use ratatui::crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}
