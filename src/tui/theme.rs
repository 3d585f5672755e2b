//! Shared styles so every pane agrees on what a color means.

use ratatui::style::{Color, Modifier, Style};

/// Column headers and labels.
pub const HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Highlighted table row or selected button.
pub const SELECTED: Style = Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD);

/// Successful outcome, backend online.
pub const SUCCESS: Style = Style::new().fg(Color::Green);

/// Failed outcome, backend offline.
pub const ERROR: Style = Style::new().fg(Color::Red);

pub const WARNING: Style = Style::new().fg(Color::Yellow);

pub const BORDER: Style = Style::new().fg(Color::White);

/// Border of the pane that has keyboard focus.
pub const FOCUSED_BORDER: Style = Style::new().fg(Color::Yellow);

/// Controls that cannot be used right now.
pub const DISABLED: Style = Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM);

/// Progress glyphs while an action runs.
pub const PROGRESS: Style = Style::new().fg(Color::Cyan);
