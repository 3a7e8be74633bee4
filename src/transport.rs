//! HTTP transport: one authenticated request in, one classified [`Outcome`] out.
//!
//! The transport never retries and never recovers a failure locally. Status
//! classification lives in [`classify`] so it can be exercised without a
//! socket.

use crate::config::Credential;
use crate::error::Failure;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

/// Path prefix every API call is issued under.
pub const API_PREFIX: &str = "/api/v1";

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Classified result of exactly one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx; `None` when the body was empty.
    Success(Option<Value>),
    /// HTTP 401, whatever the body.
    AuthFailure,
    /// Any other non-2xx status.
    ApiFailure {
        status: u16,
        message: String,
        body: Option<Value>,
    },
    /// The request never produced an HTTP response.
    TransportFailure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn into_result(self) -> Result<Option<Value>, Failure> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::AuthFailure => Err(Failure::Auth),
            Outcome::ApiFailure {
                status,
                message,
                body,
            } => Err(Failure::Api {
                status,
                message,
                body,
            }),
            Outcome::TransportFailure(message) => Err(Failure::Transport(message)),
        }
    }
}

/// Something that can issue one request and classify it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Outcome;
}

/// Builds transports for a credential. Sessions receive one of these so the
/// credential is resolved before any transport exists.
pub trait Connector {
    fn connect(&self, credential: &Credential) -> Box<dyn Transport>;
}

/// Connector producing [`HttpTransport`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, credential: &Credential) -> Box<dyn Transport> {
        Box::new(HttpTransport::new(credential))
    }
}

/// reqwest-backed transport bound to one credential.
pub struct HttpTransport {
    client: Client,
    prefix: String,
    token: String,
}

impl HttpTransport {
    pub fn new(credential: &Credential) -> Self {
        let base = credential.base_url.trim_end_matches('/');
        Self {
            client: Client::new(),
            prefix: format!("{}{}", base, API_PREFIX),
            token: credential.token.clone(),
        }
    }

    /// Join the API prefix with `path`; absolute URLs pass through.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.prefix, path)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Outcome {
        let url = self.url_for(path);
        debug!(method = method.as_str(), url = %url, "Sending request");

        let mut request = self
            .client
            .request(method.to_reqwest(), &url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, error = %e, "Request failed before a response");
                return Outcome::TransportFailure(e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Outcome::TransportFailure(e.to_string()),
        };
        debug!(url = %url, status = status.as_u16(), bytes = text.len(), "Received response");

        classify(status, &text)
    }
}

/// Parse a response body: empty → `None`, JSON → value, anything else → the
/// raw text as a JSON string.
pub fn parse_body(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

/// Classify a received response. 401 wins over everything else.
pub fn classify(status: StatusCode, text: &str) -> Outcome {
    let body = parse_body(text);

    if status == StatusCode::UNAUTHORIZED {
        return Outcome::AuthFailure;
    }

    if !status.is_success() {
        let message = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "Request failed: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
                .trim_end()
                .to_string()
            });
        return Outcome::ApiFailure {
            status: status.as_u16(),
            message,
            body,
        };
    }

    Outcome::Success(body)
}
