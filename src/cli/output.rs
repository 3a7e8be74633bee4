//! CLI output: the console sink commands write to, and failure presentation.

use crate::config::SessionConfig;
use crate::error::{Failure, AUTH_REQUIRED_MESSAGE};
use crate::render::{self, render_error_box, TableOptions};
use serde_json::Value;
use std::io::Write;

/// Command-level message for a rejected token.
pub const TOKEN_INVALID_MESSAGE: &str =
    "Token invalid or expired. Run \"gwirian auth\" to set a new token.";

/// Title, message and optional status code shown for a failure.
pub fn map_failure(failure: &Failure) -> (&'static str, String, Option<u16>) {
    let message = match failure {
        Failure::AuthRequired => AUTH_REQUIRED_MESSAGE.to_string(),
        Failure::Auth => TOKEN_INVALID_MESSAGE.to_string(),
        other => other.to_string(),
    };
    (failure.title(), message, failure.status_code())
}

/// stdout/stderr pair plus the terminal facts that shape what is written.
///
/// Write errors (closed pipe) are ignored; there is nowhere left to report them.
pub struct Console<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    stdout_is_tty: bool,
    stderr_is_tty: bool,
}

impl<'a> Console<'a> {
    pub fn new(
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
        stdout_is_tty: bool,
        stderr_is_tty: bool,
    ) -> Self {
        Self {
            out,
            err,
            stdout_is_tty,
            stderr_is_tty,
        }
    }

    pub fn for_session(out: &'a mut dyn Write, err: &'a mut dyn Write, config: &SessionConfig) -> Self {
        Self::new(out, err, config.stdout_is_tty, config.stderr_is_tty)
    }

    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    /// Boxed on an interactive stderr, the bare message otherwise.
    pub fn error(&mut self, title: &str, message: &str, status: Option<u16>) {
        if self.stderr_is_tty {
            let _ = writeln!(self.err, "{}", render_error_box(title, message, status));
        } else {
            let _ = writeln!(self.err, "{}", message);
        }
    }

    pub fn failure(&mut self, failure: &Failure) {
        let (title, message, status) = map_failure(failure);
        self.error(title, &message, status);
    }

    /// Render a value with the mode picked from `--json`, columns and TTY.
    /// An empty list prints nothing.
    pub fn value(&mut self, data: &Value, json: bool, columns: &[&str], options: &TableOptions) {
        let mode = render::select_mode(data, json, columns, self.stdout_is_tty);
        let text = render::render(data, mode, columns, options);
        if !text.is_empty() {
            self.line(&text);
        }
    }
}
