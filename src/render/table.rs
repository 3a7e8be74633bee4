//! Bordered, colored table for interactive terminals.

use super::cell_text;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use owo_colors::OwoColorize;
use serde_json::Value;

/// Longest cell text before truncation, marker included.
pub const TABLE_CELL_MAX: usize = 50;

/// Per-command layout tweaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Wrap long cells instead of truncating them.
    pub word_wrap: bool,
    /// Fixed column widths, applied in column order.
    pub col_widths: Vec<u16>,
}

/// `executed_at` → `Executed At`.
pub fn title_case(column: &str) -> String {
    column
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn truncate_cell(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn is_border(ch: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&ch)
}

/// Paint every run of box-drawing characters cyan.
fn tint_borders(rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len() * 2);
    let mut run = String::new();
    for ch in rendered.chars() {
        if is_border(ch) {
            run.push(ch);
            continue;
        }
        if !run.is_empty() {
            out.push_str(&run.cyan().to_string());
            run.clear();
        }
        out.push(ch);
    }
    if !run.is_empty() {
        out.push_str(&run.cyan().to_string());
    }
    out
}

pub fn render_table(items: &[Value], columns: &[&str], options: &TableOptions) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).enforce_styling();
    table.set_content_arrangement(if options.word_wrap {
        ContentArrangement::Dynamic
    } else {
        ContentArrangement::Disabled
    });

    table.set_header(columns.iter().map(|column| {
        Cell::new(title_case(column))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold)
    }));

    for item in items {
        table.add_row(columns.iter().map(|column| {
            let text = cell_text(item, column);
            if options.word_wrap {
                Cell::new(text)
            } else {
                Cell::new(truncate_cell(&text, TABLE_CELL_MAX))
            }
        }));
    }

    if options.word_wrap && !options.col_widths.is_empty() {
        for (column, width) in table.column_iter_mut().zip(&options.col_widths) {
            column.set_constraint(ColumnConstraint::Absolute(Width::Fixed(*width)));
        }
    }

    tint_borders(&table.to_string())
}
