//! Error types for the Gwirian client.
//!
//! Two families live here: [`GwirianError`] for local, ambient failures (config
//! file I/O, prompts, logging setup) and [`Failure`], the closed taxonomy every
//! session uses to decide presentation and exit status.

use thiserror::Error;

/// Fixed instruction shown when no token is configured.
pub const AUTH_REQUIRED_MESSAGE: &str =
    "No token configured. Run \"gwirian auth\" to set your API token.";

/// Local failures that never involve the remote service.
#[derive(Debug, Error)]
pub enum GwirianError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Install error: {0}")]
    InstallError(String),
}

impl From<config::ConfigError> for GwirianError {
    fn from(err: config::ConfigError) -> Self {
        GwirianError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for GwirianError {
    fn from(err: dialoguer::Error) -> Self {
        GwirianError::InputError(err.to_string())
    }
}

/// Classified failure surfaced by a session.
///
/// `Transport` doubles as the catch-all for anything that is not an auth or
/// API failure, including local errors that interrupt a command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    #[error("{}", AUTH_REQUIRED_MESSAGE)]
    AuthRequired,

    #[error("Token invalid or expired")]
    Auth,

    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error("{0}")]
    Transport(String),
}

impl Failure {
    /// Presentation title; a pure function of the kind and status code.
    pub fn title(&self) -> &'static str {
        match self {
            Failure::AuthRequired => "Auth required",
            Failure::Auth => "Auth",
            Failure::Api { status: 404, .. } => "Not found",
            Failure::Api { status: 403, .. } => "Forbidden",
            Failure::Api { .. } | Failure::Transport(_) => "Error",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Failure::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Process exit status decided by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
        }
    }
}

impl From<GwirianError> for Failure {
    fn from(err: GwirianError) -> Self {
        Failure::Transport(err.to_string())
    }
}
