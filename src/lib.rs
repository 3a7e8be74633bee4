//! Gwirian: command-line client for the Gwirian test-management API.
//!
//! Resource commands map to exactly one authenticated HTTP call; the
//! interactive navigator walks projects, features and scenarios. Failures are
//! classified once and rendered by a single presentation layer.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod logging;
pub mod render;
pub mod transport;
pub mod tui;
