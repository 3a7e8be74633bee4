//! Helpers shared by the integration tests
//!
//! Isolated XDG directories, credential stores in temp dirs, and a command
//! runner that captures stdout and stderr.

use gwirian::cli::{Cli, CommandSession, Commands, Console};
use gwirian::config::{CredentialStore, SessionConfig};
use gwirian::error::Exit;
use gwirian::transport::HttpConnector;
use gwirian::tui::{Answer, ScriptedPrompter};
use clap::Parser;
use std::sync::Mutex;
use tempfile::TempDir;

const ISOLATED_VARS: [&str; 2] = ["HOME", "XDG_CONFIG_HOME"];

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn set_or_remove(key: &str, value: Option<String>) {
    match value {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

/// Runs `f` with the credential directory rooted in `test_dir` (`HOME` is
/// `test_dir/home`). Callers are serialized; the previous values come back
/// afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = ISOLATED_VARS
        .iter()
        .map(|key| (*key, std::env::var(key).ok()))
        .collect();

    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path());

    let result = f();

    for (key, value) in saved {
        set_or_remove(key, value);
    }
    result
}

/// Credential store inside `dir`, optionally seeded with a token and base URL.
pub fn seeded_store(dir: &TempDir, token: Option<&str>, base_url: &str) -> CredentialStore {
    let store = CredentialStore::new(dir.path().join("gwirian-cli").join("config.json"));
    store.set_base_url(base_url).unwrap();
    if let Some(token) = token {
        store.set_token(token).unwrap();
    }
    store
}

/// Non-interactive session facts for tests.
pub fn session(json: bool, stdout_is_tty: bool, stderr_is_tty: bool) -> SessionConfig {
    SessionConfig {
        base_url_override: None,
        json,
        stdin_is_tty: false,
        stdout_is_tty,
        stderr_is_tty,
    }
}

pub fn parse_command(args: &[&str]) -> Commands {
    let argv = std::iter::once("gwirian").chain(args.iter().copied());
    Cli::try_parse_from(argv).unwrap().command.unwrap()
}

/// Result of one command run.
pub struct Captured {
    pub exit: Exit,
    pub stdout: String,
    pub stderr: String,
}

pub async fn run_command(
    config: &SessionConfig,
    store: &CredentialStore,
    answers: Vec<Answer>,
    args: &[&str],
) -> Captured {
    let command = parse_command(args);
    let connector = HttpConnector;
    let mut prompter = ScriptedPrompter::new(answers);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit = {
        let console = Console::for_session(&mut out, &mut err, config);
        let mut session = CommandSession::new(config, store, &connector, &mut prompter, console);
        session.execute(&command).await
    };
    Captured {
        exit,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}
