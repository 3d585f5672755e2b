//! Bottom status bar: key binding hints on the left, backend health on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::Component;
use crate::engine::HealthStatus;
use crate::tui::theme;

/// Status bar widget displayed at the bottom of the TUI.
pub struct StatusBar {
    /// Key binding hints as (key, description) pairs.
    pub hints: Vec<(String, String)>,
    health_label: String,
    health: Option<HealthStatus>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            hints: vec![
                ("Tab".into(), "Focus".into()),
                ("s/y/d".into(), "Scan/Sync/Dry run".into()),
                ("j/k".into(), "Scroll".into()),
                ("q".into(), "Quit".into()),
            ],
            health_label: "checking…".into(),
            health: None,
        }
    }

    pub fn set_health(&mut self, status: Option<HealthStatus>, label: String) {
        self.health = status;
        self.health_label = label;
    }

    fn health_style(&self) -> Style {
        match self.health {
            Some(HealthStatus::Online) => theme::SUCCESS,
            Some(HealthStatus::Offline) => theme::ERROR,
            None => theme::DISABLED,
        }
    }
}

/// `[key] desc` pairs separated by bars.
fn hint_spans(hints: &[(String, String)]) -> Vec<Span<'_>> {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::Gray);

    hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, desc))| {
            let sep = (i > 0).then(|| Span::styled(" | ", theme::DISABLED));
            sep.into_iter().chain([
                Span::styled(format!(" {} ", key), key_style),
                Span::styled(format!(" {}", desc), desc_style),
            ])
        })
        .collect()
}

impl Component for StatusBar {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let dot = if self.health.is_some() { "● " } else { "" };
        let health = format!("{}{} ", dot, self.health_label);
        let [hints_area, health_area] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(health.chars().count() as u16),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(Line::from(hint_spans(&self.hints))), hints_area);
        frame.render_widget(
            Paragraph::new(Span::styled(health, self.health_style())),
            health_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_are_separated() {
        let hints = vec![("q".to_string(), "Quit".to_string()), ("j/k".to_string(), "Scroll".to_string())];
        let text: String = hint_spans(&hints).iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " q  Quit |  j/k  Scroll");
    }

    #[test]
    fn health_style_follows_status() {
        let mut bar = StatusBar::new();
        assert_eq!(bar.health_style(), theme::DISABLED);
        bar.set_health(Some(HealthStatus::Offline), "offline (10:00:00)".into());
        assert_eq!(bar.health_style(), theme::ERROR);
    }
}
