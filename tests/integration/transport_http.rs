//! HTTP transport against a mock server

use gwirian::api;
use gwirian::config::Credential;
use gwirian::transport::{HttpTransport, Method, Outcome, Transport};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(base_url: &str) -> HttpTransport {
    HttpTransport::new(&Credential {
        token: "secret-token".to_string(),
        base_url: base_url.to_string(),
    })
}

#[tokio::test]
async fn test_request_carries_bearer_token_and_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/projects/42/features"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "feature": { "title": "Checkout" } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7, "title": "Checkout" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server.uri());
    let request = api::create_feature(
        "42",
        &api::FeatureBody {
            title: Some("Checkout".into()),
            ..Default::default()
        },
    );
    let outcome = request.send(&transport).await;

    assert_eq!(
        outcome,
        Outcome::Success(Some(json!({ "id": 7, "title": "Checkout" })))
    );
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&format!("{}/", server.uri()));
    let outcome = transport.send(Method::Get, "/projects", None).await;
    assert_eq!(outcome, Outcome::Success(Some(json!([]))));
}

#[tokio::test]
async fn test_unauthorized_is_auth_failure_whatever_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Feature not found" })))
        .mount(&server)
        .await;

    let transport = transport_for(&server.uri());
    let outcome = api::list_projects().send(&transport).await;
    assert_eq!(outcome, Outcome::AuthFailure);
}

#[tokio::test]
async fn test_not_found_uses_server_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects/42/features/7/scenarios"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Feature not found" })))
        .mount(&server)
        .await;

    let transport = transport_for(&server.uri());
    let outcome = api::list_scenarios("42", "7").send(&transport).await;
    assert_eq!(
        outcome,
        Outcome::ApiFailure {
            status: 404,
            message: "Feature not found".to_string(),
            body: Some(json!({ "error": "Feature not found" })),
        }
    );
}

#[tokio::test]
async fn test_non_json_error_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let transport = transport_for(&server.uri());
    let outcome = api::delete_feature("1", "2").send(&transport).await;
    match outcome {
        Outcome::ApiFailure { status, message, body } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Request failed: 500 Internal Server Error");
            assert_eq!(body, Some(json!("<html>oops</html>")));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/projects/1/features/2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let transport = transport_for(&server.uri());
    let outcome = api::delete_feature("1", "2").send(&transport).await;
    assert_eq!(outcome, Outcome::Success(None));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let transport = transport_for(&format!("http://127.0.0.1:{}", port));
    let outcome = api::list_projects().send(&transport).await;
    assert!(matches!(outcome, Outcome::TransportFailure(_)));
}
