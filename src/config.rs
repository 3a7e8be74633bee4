//! Configuration System
//!
//! Persisted credential store, optional settings file, and the per-process
//! [`SessionConfig`] every command handler receives explicitly.

use crate::error::Failure;

mod settings;
mod store;
pub mod xdg;

pub use settings::{ConfigLoader, Settings};
pub use store::{CredentialStore, StoredConfig, DEFAULT_BASE_URL};

/// Token and base URL used to authenticate every call.
///
/// Only constructed through [`SessionConfig::resolve`] or a completed setup
/// flow, so a credential always carries a non-empty token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub base_url: String,
}

/// Facts fixed at process start: CLI overrides and terminal attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// `--base-url` for this run only.
    pub base_url_override: Option<String>,
    /// `--json` forces JSON output.
    pub json: bool,
    pub stdin_is_tty: bool,
    pub stdout_is_tty: bool,
    pub stderr_is_tty: bool,
}

impl SessionConfig {
    /// Detect terminal attachment for the current process.
    pub fn detect(base_url_override: Option<String>, json: bool) -> Self {
        use std::io::IsTerminal;
        Self {
            base_url_override,
            json,
            stdin_is_tty: std::io::stdin().is_terminal(),
            stdout_is_tty: std::io::stdout().is_terminal(),
            stderr_is_tty: std::io::stderr().is_terminal(),
        }
    }

    /// Base URL for this run: the override when given, else the stored one.
    pub fn base_url(&self, stored: &StoredConfig) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| stored.base_url.clone())
    }

    /// Merge the override over the stored config. The token has no override
    /// path; a missing or empty token is `AuthRequired`.
    pub fn resolve(&self, stored: &StoredConfig) -> Result<Credential, Failure> {
        match stored.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(Credential {
                token: token.to_string(),
                base_url: self.base_url(stored),
            }),
            _ => Err(Failure::AuthRequired),
        }
    }
}
