//! Single-line vault path input.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Component;
use crate::tui::action::UiAction;
use crate::tui::theme;

pub struct VaultInput {
    text: String,
    focused: bool,
}

impl VaultInput {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            text: initial.unwrap_or_default().to_string(),
            focused: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl Component for VaultInput {
    fn handle_key_event(&mut self, key: KeyEvent) -> UiAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                if self.text.is_empty() {
                    return UiAction::Noop;
                }
                self.text.clear();
                UiAction::InputChanged
            }
            KeyCode::Char(_) if ctrl => UiAction::Noop,
            KeyCode::Char(c) => {
                self.text.push(c);
                UiAction::InputChanged
            }
            KeyCode::Backspace => {
                if self.text.pop().is_some() {
                    UiAction::InputChanged
                } else {
                    UiAction::Noop
                }
            }
            KeyCode::Enter => UiAction::FocusNext,
            _ => UiAction::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::FOCUSED_BORDER
        } else {
            theme::BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Vault (empty = disabled, blank = service default) ");

        let inner_width = area.width.saturating_sub(2) as usize;
        let chars = self.text.chars().count();
        // keep the tail visible when the path is wider than the box
        let visible: String = if chars >= inner_width && inner_width > 0 {
            self.text.chars().skip(chars + 1 - inner_width).collect()
        } else {
            self.text.clone()
        };

        if self.focused {
            let cursor_x = area.x + 1 + visible.chars().count() as u16;
            frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
        }
        frame.render_widget(Paragraph::new(visible).block(block), area);
    }
}
