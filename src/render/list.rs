//! Plain fixed-width column list for piped output.

use super::cell_text;
use serde_json::Value;

/// Widest a list column may get.
pub const LIST_MAX_WIDTH: usize = 40;

const SEPARATOR: &str = "  ";

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.chars().take(width).collect()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Header, dashed separator, then one row per item. Empty input renders as an
/// empty string.
pub fn render_list(items: &[Value], columns: &[&str]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let cells: Vec<Vec<String>> = items
        .iter()
        .map(|item| columns.iter().map(|c| cell_text(item, c)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let widest = cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0);
            widest.min(LIST_MAX_WIDTH)
        })
        .collect();

    let mut lines = Vec::with_capacity(items.len() + 2);
    lines.push(
        columns
            .iter()
            .zip(&widths)
            .map(|(column, &w)| pad(column, w))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    );
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    );
    for row in &cells {
        lines.push(
            row.iter()
                .zip(&widths)
                .map(|(value, &w)| {
                    if value.chars().count() > w {
                        let kept: String = value.chars().take(w.saturating_sub(2)).collect();
                        format!("{}..", kept)
                    } else {
                        pad(value, w)
                    }
                })
                .collect::<Vec<_>>()
                .join(SEPARATOR),
        );
    }
    lines.join("\n")
}
