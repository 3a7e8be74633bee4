//! Navigation state machine.
//!
//! [`ViewState`] is mutated only by [`ViewState::update`]; each update returns
//! the single [`Effect`] the driver must perform next. The reducer never does
//! I/O, so every transition is testable without a terminal or a server.

use crate::api::{self, Request};
use crate::cli::map_failure;
use crate::config::Credential;
use crate::error::Exit;
use crate::transport::Outcome;
use serde_json::Value;
use tracing::info;

/// Shown when the token entered during setup is rejected.
pub const SETUP_TOKEN_INVALID_MESSAGE: &str =
    "Token is invalid or expired. Please check and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    AwaitToken,
    AwaitBaseUrl,
    Testing,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Projects,
    Features,
    Scenarios,
}

impl Stage {
    pub fn noun(self) -> &'static str {
        match self {
            Stage::Projects => "projects",
            Stage::Features => "features",
            Stage::Scenarios => "scenarios",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup(SetupStep),
    Browse(Stage),
}

/// Input the driver feeds back into the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TokenSubmitted(String),
    BaseUrlSubmitted(String),
    CallCompleted(Outcome),
    /// Index into the current listing.
    Selected(usize),
}

/// Work the driver performs after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Wait for user input.
    None,
    /// Persist the credential, then issue `list projects` with it.
    Validate(Credential),
    Fetch(Request),
    Exit(Exit),
}

/// What the user is being asked for, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingInput {
    Token,
    /// Prefilled with the current base URL.
    BaseUrl(String),
    Select { prompt: &'static str, labels: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub screen: Screen,
    pub loading: bool,
    pub error: Option<String>,
    pub token: String,
    pub base_url: String,
    pub selected_project_id: Option<String>,
    pub selected_feature_id: Option<String>,
    /// Records of the current browse stage.
    pub items: Vec<Value>,
}

impl ViewState {
    fn new(screen: Screen, base_url: &str) -> Self {
        Self {
            screen,
            loading: false,
            error: None,
            token: String::new(),
            base_url: base_url.to_string(),
            selected_project_id: None,
            selected_feature_id: None,
            items: Vec::new(),
        }
    }

    /// Initial state: browse when a credential exists, setup otherwise.
    pub fn start(credential: Option<&Credential>, base_url: &str) -> (Self, Effect) {
        match credential {
            Some(credential) => {
                let mut state = Self::new(Screen::Browse(Stage::Projects), &credential.base_url);
                state.loading = true;
                (state, Effect::Fetch(api::list_projects()))
            }
            None => (
                Self::new(Screen::Setup(SetupStep::AwaitToken), base_url),
                Effect::None,
            ),
        }
    }

    /// Apply one event. Events that do not fit the current screen are ignored.
    pub fn update(&mut self, event: Event) -> Effect {
        match (self.screen, event) {
            (Screen::Setup(SetupStep::AwaitToken), Event::TokenSubmitted(value)) => {
                let token = value.trim();
                if token.is_empty() {
                    self.error = Some("Token cannot be empty.".to_string());
                    return Effect::None;
                }
                self.token = token.to_string();
                self.error = None;
                self.screen = Screen::Setup(SetupStep::AwaitBaseUrl);
                Effect::None
            }
            (Screen::Setup(SetupStep::AwaitBaseUrl), Event::BaseUrlSubmitted(value)) => {
                let value = value.trim();
                let url = if value.is_empty() {
                    self.base_url.clone()
                } else {
                    value.trim_end_matches('/').to_string()
                };
                self.base_url = url;
                self.error = None;
                self.loading = true;
                self.screen = Screen::Setup(SetupStep::Testing);
                info!(base_url = %self.base_url, "Testing connection");
                Effect::Validate(Credential {
                    token: self.token.clone(),
                    base_url: self.base_url.clone(),
                })
            }
            (Screen::Setup(SetupStep::Testing), Event::CallCompleted(outcome)) => {
                self.loading = false;
                match outcome {
                    Outcome::Success(_) => {
                        self.screen = Screen::Setup(SetupStep::Done);
                        Effect::Exit(Exit::Success)
                    }
                    Outcome::AuthFailure => {
                        self.error = Some(SETUP_TOKEN_INVALID_MESSAGE.to_string());
                        self.screen = Screen::Setup(SetupStep::AwaitBaseUrl);
                        Effect::None
                    }
                    other => {
                        self.error = Some(failure_message(other));
                        self.screen = Screen::Setup(SetupStep::AwaitBaseUrl);
                        Effect::None
                    }
                }
            }
            (Screen::Browse(stage), Event::CallCompleted(outcome)) if self.loading => {
                self.loading = false;
                match outcome {
                    Outcome::Success(body) => {
                        self.items = match body {
                            Some(Value::Array(items)) => items,
                            _ => Vec::new(),
                        };
                        info!(stage = stage.noun(), count = self.items.len(), "Listing loaded");
                        if self.items.is_empty() || stage == Stage::Scenarios {
                            Effect::Exit(Exit::Success)
                        } else {
                            Effect::None
                        }
                    }
                    other => {
                        self.error = Some(failure_message(other));
                        Effect::Exit(Exit::Failure)
                    }
                }
            }
            (Screen::Browse(stage), Event::Selected(index)) if !self.loading => {
                let Some(id) = self.items.get(index).and_then(record_id) else {
                    return Effect::None;
                };
                match stage {
                    Stage::Projects => {
                        let request = api::list_features(&id);
                        self.selected_project_id = Some(id);
                        self.enter(Stage::Features, request)
                    }
                    Stage::Features => {
                        let Some(project_id) = self.selected_project_id.clone() else {
                            return Effect::None;
                        };
                        let request = api::list_scenarios(&project_id, &id);
                        self.selected_feature_id = Some(id);
                        self.enter(Stage::Scenarios, request)
                    }
                    Stage::Scenarios => Effect::None,
                }
            }
            _ => Effect::None,
        }
    }

    fn enter(&mut self, stage: Stage, request: Request) -> Effect {
        self.screen = Screen::Browse(stage);
        self.items.clear();
        self.error = None;
        self.loading = true;
        Effect::Fetch(request)
    }

    /// The prompt the driver should show when the last effect was `None`.
    pub fn pending_input(&self) -> Option<PendingInput> {
        if self.loading {
            return None;
        }
        match self.screen {
            Screen::Setup(SetupStep::AwaitToken) => Some(PendingInput::Token),
            Screen::Setup(SetupStep::AwaitBaseUrl) => {
                Some(PendingInput::BaseUrl(self.base_url.clone()))
            }
            Screen::Browse(Stage::Projects) if self.error.is_none() && !self.items.is_empty() => {
                Some(PendingInput::Select {
                    prompt: "Project",
                    labels: self.items.iter().map(|p| label(p, "name")).collect(),
                })
            }
            Screen::Browse(Stage::Features) if self.error.is_none() && !self.items.is_empty() => {
                Some(PendingInput::Select {
                    prompt: "Feature",
                    labels: self.items.iter().map(|f| label(f, "title")).collect(),
                })
            }
            _ => None,
        }
    }
}

fn failure_message(outcome: Outcome) -> String {
    match outcome.into_result() {
        Err(failure) => map_failure(&failure).1,
        Ok(_) => String::new(),
    }
}

/// Record id as a path segment; ids arrive as numbers or strings.
pub(crate) fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn label(record: &Value, field: &str) -> String {
    match record.get(field).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("#{}", record_id(record).unwrap_or_default()),
    }
}
