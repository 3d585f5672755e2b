//! Scrollable deck/front/back table of scanned cards.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use super::Component;
use crate::engine::ResultTable;
use crate::tui::action::UiAction;
use crate::tui::theme;

pub struct ResultsView {
    table: ResultTable,
    table_state: TableState,
    title: String,
}

impl ResultsView {
    pub fn new() -> Self {
        Self {
            table: ResultTable::new(),
            table_state: TableState::default(),
            title: " Cards ".into(),
        }
    }

    /// Take a fresh copy of the engine's table, resetting the scroll position.
    pub fn sync_from(&mut self, table: &ResultTable) {
        if &self.table == table {
            return;
        }
        self.table = table.clone();
        self.title = if table.is_placeholder() {
            " Cards ".into()
        } else {
            format!(" Cards ({}) ", table.len())
        };
        self.table_state.select(Some(0));
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }
}

/// Card text may span lines; the table shows one line per row.
fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Component for ResultsView {
    fn handle_key_event(&mut self, key: KeyEvent) -> UiAction {
        let len = self.table.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let current = self.table_state.selected().unwrap_or(0);
                self.table_state.select(Some(current.saturating_sub(1)));
                UiAction::ScrollUp
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let current = self.table_state.selected().unwrap_or(0);
                self.table_state
                    .select(Some((current + 1).min(len.saturating_sub(1))));
                UiAction::ScrollDown
            }
            _ => UiAction::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(
            ["Deck", "Front", "Back"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::HEADER)),
        )
        .height(1);

        let rows: Vec<Row> = self
            .table
            .rows()
            .iter()
            .map(|[deck, front, back]| {
                Row::new(vec![
                    Cell::from(flatten(deck)),
                    Cell::from(flatten(front)),
                    Cell::from(flatten(back)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(20),
                Constraint::Percentage(40),
                Constraint::Percentage(40),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::BORDER)
                .title(self.title.as_str()),
        )
        .row_highlight_style(theme::SELECTED);

        let mut table_state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::sample_cards;
    use crate::tui::components::test_key;

    #[test]
    fn flatten_collapses_newlines() {
        assert_eq!(flatten("a\nb  c"), "a b c");
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut table = ResultTable::new();
        table.render(Some(&sample_cards(3)));
        let mut view = ResultsView::new();
        view.sync_from(&table);
        assert_eq!(view.selected(), Some(0));

        assert_eq!(view.handle_key_event(test_key(KeyCode::Up)), UiAction::ScrollUp);
        assert_eq!(view.selected(), Some(0));

        for _ in 0..5 {
            view.handle_key_event(test_key(KeyCode::Char('j')));
        }
        assert_eq!(view.selected(), Some(2));
    }

    #[test]
    fn sync_resets_selection_only_on_change() {
        let mut table = ResultTable::new();
        table.render(Some(&sample_cards(3)));
        let mut view = ResultsView::new();
        view.sync_from(&table);
        view.handle_key_event(test_key(KeyCode::Down));
        view.sync_from(&table);
        assert_eq!(view.selected(), Some(1));

        table.render(None);
        view.sync_from(&table);
        assert_eq!(view.selected(), Some(0));
    }
}
