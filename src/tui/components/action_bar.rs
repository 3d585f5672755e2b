//! Row of action buttons.
//!
//! Buttons render disabled while the vault input is empty and busy while an
//! action is in flight. The bar itself never gates: triggers always go to
//! the dispatcher, which drops the ones it must.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Component;
use crate::engine::{Action, Phase};
use crate::tui::action::UiAction;
use crate::tui::theme;

pub struct ActionBar {
    selected: usize,
    phase: Phase,
    focused: bool,
}

impl ActionBar {
    pub fn new() -> Self {
        Self {
            selected: 0,
            phase: Phase::Idle,
            focused: false,
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn selected(&self) -> Action {
        Action::ALL[self.selected]
    }

    fn shortcut(action: Action) -> char {
        match action {
            Action::Scan => 's',
            Action::Sync => 'y',
            Action::DryRun => 'd',
        }
    }

    fn button_style(&self, index: usize) -> Style {
        let base = match self.phase {
            Phase::Idle => theme::DISABLED,
            Phase::InFlight => Style::default().add_modifier(Modifier::DIM),
            Phase::Armed => Style::default(),
        };
        if self.focused && index == self.selected {
            base.patch(theme::SELECTED)
        } else {
            base
        }
    }
}

impl Component for ActionBar {
    fn handle_key_event(&mut self, key: KeyEvent) -> UiAction {
        let count = Action::ALL.len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = (self.selected + count - 1) % count;
                UiAction::Noop
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = (self.selected + 1) % count;
                UiAction::Noop
            }
            KeyCode::Enter => UiAction::Trigger(self.selected()),
            KeyCode::Char(c) => Action::ALL
                .into_iter()
                .find(|a| Self::shortcut(*a) == c)
                .map(UiAction::Trigger)
                .unwrap_or(UiAction::Noop),
            _ => UiAction::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, action) in Action::ALL.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                format!(" [{}] {} ", Self::shortcut(action), action.label()),
                self.button_style(i),
            ));
        }
        match self.phase {
            Phase::InFlight => spans.push(Span::styled("   busy", theme::WARNING)),
            Phase::Idle => spans.push(Span::styled("   enter a vault path", theme::DISABLED)),
            Phase::Armed => {}
        }

        let border = if self.focused {
            theme::FOCUSED_BORDER
        } else {
            theme::BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Actions ");
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
