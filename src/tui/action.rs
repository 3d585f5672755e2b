use crate::engine::Action;

/// Results of key handling, processed by the App's main loop.
///
/// Each component's `handle_key_event` returns a UiAction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// No operation -- event was handled but no further action needed.
    Noop,
    /// Quit the TUI application.
    Quit,
    /// Move focus to the next pane.
    FocusNext,
    /// The vault input text changed.
    InputChanged,
    /// Run a remote action.
    Trigger(Action),
    /// Scroll up in the results table.
    ScrollUp,
    /// Scroll down in the results table.
    ScrollDown,
}
