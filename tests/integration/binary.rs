//! The compiled binary: argument handling, exit codes and stream separation

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn gwirian(config_home: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_gwirian"));
    command
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("GWIRIAN_LOG")
        .stdin(Stdio::null());
    command
}

#[test]
fn test_no_arguments_without_terminal_prints_help() {
    let dir = TempDir::new().unwrap();
    let output = gwirian(&dir).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("scenario-executions"));
}

#[test]
fn test_flags_without_command_print_help() {
    let dir = TempDir::new().unwrap();
    for flags in [
        vec!["--json"],
        vec!["--verbose"],
        vec!["--base-url", "http://localhost:3000"],
    ] {
        let output = gwirian(&dir).args(&flags).output().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Usage"), "no help for {:?}", flags);
    }
}

#[test]
fn test_auth_reads_piped_token() {
    let dir = TempDir::new().unwrap();
    let mut child = gwirian(&dir)
        .arg("auth")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"mytoken\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Token saved.\n");
    let raw = std::fs::read_to_string(dir.path().join("gwirian-cli").join("config.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["token"], "mytoken");
}

#[test]
fn test_missing_token_exits_one_with_instruction() {
    let dir = TempDir::new().unwrap();
    let output = gwirian(&dir)
        .args(["features", "list", "42", "--base-url", "http://127.0.0.1:9"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "No token configured. Run \"gwirian auth\" to set your API token.\n"
    );
    assert!(!dir.path().join("gwirian-cli").exists());
}

#[test]
fn test_config_round_trip_through_binary() {
    let dir = TempDir::new().unwrap();
    let output = gwirian(&dir)
        .args(["config", "set", "base-url", "http://localhost:3000"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = gwirian(&dir).args(["config", "get"]).output().unwrap();
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Base URL: http://localhost:3000\nToken: not set\n"
    );
}

#[test]
fn test_verbose_logs_go_to_stderr_only() {
    let dir = TempDir::new().unwrap();
    let output = gwirian(&dir)
        .args(["--verbose", "config", "get"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Base URL: https://app.gwirian.com"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Gwirian CLI starting"));
}

#[test]
fn test_invalid_executed_at_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = gwirian(&dir)
        .args([
            "scenario-executions",
            "create",
            "1",
            "2",
            "3",
            "--executed-at",
            "tomorrow",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not an ISO date"));
}
