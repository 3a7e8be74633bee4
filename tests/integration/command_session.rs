//! Command session end to end: parsed command in, one HTTP call, captured output

use gwirian::cli::TOKEN_INVALID_MESSAGE;
use gwirian::config::SessionConfig;
use gwirian::error::{Exit, AUTH_REQUIRED_MESSAGE};
use gwirian::render::render_json;
use gwirian::tui::Answer;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::{run_command, seeded_store, session};

fn piped() -> SessionConfig {
    session(false, false, false)
}

#[tokio::test]
async fn test_missing_token_stops_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, None, &server.uri());

    let captured = run_command(&piped(), &store, vec![], &["features", "list", "42"]).await;

    assert_eq!(captured.exit, Exit::Failure);
    assert_eq!(captured.stderr, format!("{}\n", AUTH_REQUIRED_MESSAGE));
    assert!(captured.stdout.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_not_found_is_boxed_on_terminal_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/42/features/7/scenarios"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Feature not found" })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("tok"), &server.uri());

    let captured = run_command(
        &session(false, false, true),
        &store,
        vec![],
        &["scenarios", "list", "42", "7"],
    )
    .await;

    assert_eq!(captured.exit, Exit::Failure);
    assert!(captured.stderr.contains("Not found (404)"));
    assert!(captured.stderr.contains("Feature not found"));
    assert!(captured.stderr.contains('╭'));
    assert!(captured.stdout.is_empty());
}

#[tokio::test]
async fn test_rejected_token_points_to_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("stale"), &server.uri());

    let captured = run_command(&piped(), &store, vec![], &["projects", "list"]).await;

    assert_eq!(captured.exit, Exit::Failure);
    assert_eq!(captured.stderr, format!("{}\n", TOKEN_INVALID_MESSAGE));
}

#[tokio::test]
async fn test_piped_list_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Shop", "description": null },
            { "id": 2, "name": "Blog", "description": "Posts" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("tok"), &server.uri());

    let captured = run_command(&piped(), &store, vec![], &["projects", "list"]).await;

    assert_eq!(captured.exit, Exit::Success);
    let lines: Vec<&str> = captured.stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("id  name"));
    assert!(lines[2].contains("Shop"));
    assert!(lines[3].contains("Posts"));
    assert!(captured.stderr.is_empty());
}

#[tokio::test]
async fn test_json_flag_prints_body_verbatim() {
    let body = json!({ "id": 7, "title": "Checkout", "scenarios_count": 3 });
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/42/features"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([body.clone()])))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("tok"), &server.uri());

    let captured = run_command(
        &session(true, true, true),
        &store,
        vec![],
        &["features", "list", "42"],
    )
    .await;

    assert_eq!(captured.exit, Exit::Success);
    assert_eq!(captured.stdout, format!("{}\n", render_json(&json!([body]))));
}

#[tokio::test]
async fn test_create_renders_returned_resource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/1/features/2/scenarios"))
        .and(body_json(json!({ "scenario": { "title": "Login", "position": 2 } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 5, "title": "Login" })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("tok"), &server.uri());

    let captured = run_command(
        &piped(),
        &store,
        vec![],
        &["scenarios", "create", "1", "2", "--title", "Login", "--position", "2"],
    )
    .await;

    assert_eq!(captured.exit, Exit::Success);
    assert_eq!(
        captured.stdout,
        format!("{}\n", render_json(&json!({ "id": 5, "title": "Login" })))
    );
}

#[tokio::test]
async fn test_delete_prints_confirmation_only() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/projects/1/features/2/scenarios/3/scenario_executions/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4, "status": "passed" })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("tok"), &server.uri());

    let captured = run_command(
        &piped(),
        &store,
        vec![],
        &["scenario-executions", "delete", "1", "2", "3", "4"],
    )
    .await;

    assert_eq!(captured.exit, Exit::Success);
    assert_eq!(captured.stdout, "Scenario execution deleted.\n");
}

#[tokio::test]
async fn test_search_lists_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/5/search"))
        .and(query_param("q", "login form"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "login form",
            "results": [{ "type": "scenario", "id": 9, "title": "Login form", "status": "passed" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("tok"), &server.uri());

    let captured = run_command(
        &piped(),
        &store,
        vec![],
        &["projects", "search", "5", "login form", "--limit", "3"],
    )
    .await;

    assert_eq!(captured.exit, Exit::Success);
    assert!(captured.stdout.starts_with("type"));
    assert!(captured.stdout.contains("Login form"));
    assert!(!captured.stdout.contains("\"query\""));
}

#[tokio::test]
async fn test_base_url_override_applies_to_one_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 3 })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("tok"), "http://stored.invalid");
    let mut config = piped();
    config.base_url_override = Some(server.uri());

    let captured = run_command(&config, &store, vec![], &["projects", "show", "3"]).await;

    assert_eq!(captured.exit, Exit::Success);
    assert_eq!(store.load().base_url, "http://stored.invalid");
}

#[tokio::test]
async fn test_auth_saves_trimmed_token() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, None, "http://unused.invalid");

    let captured = run_command(
        &piped(),
        &store,
        vec![Answer::Text("  abc123  ".into())],
        &["auth"],
    )
    .await;

    assert_eq!(captured.exit, Exit::Success);
    assert_eq!(captured.stdout, "Token saved.\n");
    assert_eq!(store.load().token.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_auth_rejects_empty_token() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("old"), "http://unused.invalid");

    let captured = run_command(&piped(), &store, vec![Answer::Text("   ".into())], &["auth"]).await;

    assert_eq!(captured.exit, Exit::Failure);
    assert_eq!(captured.stderr, "Token cannot be empty.\n");
    assert_eq!(store.load().token.as_deref(), Some("old"));
}

#[tokio::test]
async fn test_auth_test_reports_connection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, None, &server.uri());

    let captured = run_command(
        &piped(),
        &store,
        vec![Answer::Text("good".into())],
        &["auth", "--test"],
    )
    .await;

    assert_eq!(captured.exit, Exit::Success);
    assert_eq!(captured.stdout, "Token saved.\nConnection successful.\n");
}

#[tokio::test]
async fn test_auth_test_keeps_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, None, &server.uri());

    let captured = run_command(
        &piped(),
        &store,
        vec![Answer::Text("bad".into())],
        &["auth", "-t"],
    )
    .await;

    assert_eq!(captured.exit, Exit::Failure);
    assert_eq!(captured.stdout, "Token saved.\n");
    assert_eq!(captured.stderr, "Token is invalid or expired.\n");
    assert_eq!(store.load().token.as_deref(), Some("bad"));
}

#[tokio::test]
async fn test_logout_and_config_commands() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, Some("tok"), "https://app.gwirian.com");

    let captured = run_command(&piped(), &store, vec![], &["config", "get"]).await;
    assert_eq!(captured.stdout, "Base URL: https://app.gwirian.com\nToken: set\n");

    let captured = run_command(
        &piped(),
        &store,
        vec![],
        &["config", "set", "base-url", "http://localhost:3000/"],
    )
    .await;
    assert_eq!(captured.stdout, "Base URL set to: http://localhost:3000/\n");
    assert_eq!(store.load().base_url, "http://localhost:3000");

    let captured = run_command(&piped(), &store, vec![], &["logout"]).await;
    assert_eq!(captured.exit, Exit::Success);
    assert_eq!(captured.stdout, "Token cleared.\n");

    let captured = run_command(&piped(), &store, vec![], &["config", "get"]).await;
    assert_eq!(captured.stdout, "Base URL: http://localhost:3000\nToken: not set\n");
}

#[tokio::test]
async fn test_install_without_skills_flag() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir, None, "http://unused.invalid");

    let captured = run_command(&piped(), &store, vec![], &["install"]).await;

    assert_eq!(captured.exit, Exit::Success);
    assert_eq!(captured.stdout, "Use --skills to install the gwirian-cli skill.\n");
}
