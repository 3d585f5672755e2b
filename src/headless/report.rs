//! Plain-text rendering of the result table for stdout.

use crate::engine::ResultTable;

const HEADERS: [&str; 3] = ["DECK", "FRONT", "BACK"];
const MAX_COLUMN: usize = 40;

/// Aligned DECK/FRONT/BACK columns, one line per row plus a header.
///
/// Cell text is flattened to one line and cut at `MAX_COLUMN` characters.
pub fn format_table(table: &ResultTable) -> String {
    let cells: Vec<[String; 3]> = table
        .rows()
        .iter()
        .map(|row| row.clone().map(|cell| truncate_chars(&flatten(&cell), MAX_COLUMN)))
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, row: &[String; 3], widths: &[usize; 3]) {
    let line = format!(
        "{:<w0$}  {:<w1$}  {}",
        row[0],
        row[1],
        row[2],
        w0 = widths[0],
        w1 = widths[1],
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut on character boundaries; card text is rarely ASCII-only.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
