//! Projection of scan results into table rows.

use crate::api::Card;

/// Cell text used for the empty-state row.
pub const PLACEHOLDER: &str = "---";

/// One table row: deck, front, back.
pub type Row = [String; 3];

/// Rows currently shown in the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    rows: Vec<Row>,
}

impl ResultTable {
    /// An empty table shows the placeholder row.
    pub fn new() -> Self {
        let mut table = Self { rows: Vec::new() };
        table.render(None);
        table
    }

    /// Replace all rows with one row per card, in input order.
    ///
    /// `None` or an empty slice renders a single placeholder row.
    pub fn render(&mut self, cards: Option<&[Card]>) {
        self.rows.clear();
        match cards {
            Some(cards) if !cards.is_empty() => {
                self.rows.extend(
                    cards
                        .iter()
                        .map(|c| [c.deck.clone(), c.front.clone(), c.back.clone()]),
                );
            }
            _ => self.rows.push(placeholder_row()),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_placeholder(&self) -> bool {
        self.rows.len() == 1 && self.rows[0] == placeholder_row()
    }
}

impl Default for ResultTable {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder_row() -> Row {
    [PLACEHOLDER.into(), PLACEHOLDER.into(), PLACEHOLDER.into()]
}
