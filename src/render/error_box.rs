//! Boxed error for interactive stderr.

use owo_colors::OwoColorize;

/// Message lines wrap at this many characters.
pub const WRAP_WIDTH: usize = 60;

/// Narrowest content area of the box.
pub const MIN_CONTENT_WIDTH: usize = 20;

/// Wrap each paragraph of `text` at `width` characters. A line breaks at the
/// last space before the limit if that space lies past the midpoint,
/// otherwise it is cut hard at the limit.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut rest: Vec<char> = paragraph.chars().collect();
        while rest.len() > width {
            let space = rest[..width]
                .iter()
                .rposition(|c| *c == ' ')
                .filter(|&i| i > width / 2);
            match space {
                Some(i) => {
                    lines.push(rest[..i].iter().collect());
                    rest.drain(..=i);
                }
                None => {
                    lines.push(rest[..width].iter().collect());
                    rest.drain(..width);
                }
            }
        }
        lines.push(rest.into_iter().collect());
    }
    lines
}

/// Red-bordered box: title (with `(status)` when given), divider, wrapped message.
pub fn render_error_box(title: &str, message: &str, status: Option<u16>) -> String {
    let title = match status {
        Some(code) => format!("{} ({})", title, code),
        None => title.to_string(),
    };
    let lines = wrap_text(message, WRAP_WIDTH);
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0)
        .max(MIN_CONTENT_WIDTH);
    let rule = "─".repeat(content_width + 2);

    let side = "│".red().to_string();
    let row = |text: &str, styled: String| {
        let padding = " ".repeat(content_width.saturating_sub(text.chars().count()));
        format!("{} {}{} {}", side, styled, padding, side)
    };

    let mut out = Vec::with_capacity(lines.len() + 4);
    out.push(format!("╭{}╮", rule).red().to_string());
    out.push(row(&title, title.bold().red().to_string()));
    out.push(format!("├{}┤", rule).red().to_string());
    for line in &lines {
        out.push(row(line, line.clone()));
    }
    out.push(format!("╰{}╯", rule).red().to_string());
    out.join("\n")
}
