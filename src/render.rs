//! Renderer: domain values to text.
//!
//! Three output forms (JSON, plain column list, bordered table) plus the boxed
//! error used on interactive stderr. Everything here is a pure function of its
//! inputs; terminal attachment is passed in, never probed.

mod error_box;
mod list;
mod table;

pub use error_box::{render_error_box, wrap_text};
pub use list::render_list;
pub use table::{render_table, title_case, TableOptions};

use serde_json::Value;

/// Output form for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Json,
    List,
    Table,
}

/// Pick the output form.
///
/// `--json` always wins. An array with columns becomes a table on a TTY (when
/// non-empty) and a plain list otherwise. Everything else is JSON.
pub fn select_mode(data: &Value, json: bool, columns: &[&str], stdout_is_tty: bool) -> RenderMode {
    if json {
        return RenderMode::Json;
    }
    match data {
        Value::Array(items) if !columns.is_empty() => {
            if stdout_is_tty && !items.is_empty() {
                RenderMode::Table
            } else {
                RenderMode::List
            }
        }
        _ => RenderMode::Json,
    }
}

/// Pretty JSON with two-space indentation.
pub fn render_json(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

/// Render `data` in `mode`. Non-array data in List/Table mode falls back to JSON.
pub fn render(data: &Value, mode: RenderMode, columns: &[&str], options: &TableOptions) -> String {
    match (mode, data) {
        (RenderMode::List, Value::Array(items)) => render_list(items, columns),
        (RenderMode::Table, Value::Array(items)) => render_table(items, columns, options),
        _ => render_json(data),
    }
}

/// Cell text for a row field: missing and null are empty, strings are raw,
/// everything else is compact JSON.
pub(crate) fn cell_text(row: &Value, column: &str) -> String {
    match row.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Drop SGR escape sequences so tests can compare visible text.
#[cfg(test)]
pub(crate) fn strip_ansi(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}
