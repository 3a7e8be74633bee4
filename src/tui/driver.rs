//! Line-oriented host for the navigation state machine.
//!
//! Loop: draw the frame, perform the pending effect (or ask for input), feed
//! the resulting event back into the reducer. Returns once a terminal screen
//! has been drawn.

use super::prompt::Prompter;
use super::state::{Effect, Event, PendingInput, ViewState};
use super::view;
use crate::api;
use crate::config::{CredentialStore, SessionConfig};
use crate::error::{Exit, GwirianError};
use crate::transport::{Connector, Outcome, Transport};
use std::io::Write;
use tracing::{debug, info};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Everything the navigation session needs from the outside world.
pub struct Navigator<'a> {
    config: &'a SessionConfig,
    store: &'a CredentialStore,
    connector: &'a dyn Connector,
    prompter: &'a mut dyn Prompter,
    out: &'a mut dyn Write,
}

impl<'a> Navigator<'a> {
    pub fn new(
        config: &'a SessionConfig,
        store: &'a CredentialStore,
        connector: &'a dyn Connector,
        prompter: &'a mut dyn Prompter,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            config,
            store,
            connector,
            prompter,
            out,
        }
    }

    /// Run until a terminal screen is reached.
    pub async fn run(&mut self) -> Result<Exit, GwirianError> {
        let stored = self.store.load();
        let credential = self.config.resolve(&stored).ok();
        let mut transport: Option<Box<dyn Transport>> =
            credential.as_ref().map(|c| self.connector.connect(c));

        let (mut state, mut effect) =
            ViewState::start(credential.as_ref(), &self.config.base_url(&stored));
        info!(screen = ?state.screen, "Navigation started");

        loop {
            self.draw(&state)?;
            let event = match effect {
                Effect::Exit(exit) => {
                    info!(screen = ?state.screen, exit = exit.code(), "Navigation finished");
                    return Ok(exit);
                }
                Effect::Validate(credential) => {
                    // Persisted before validation; a rejected token stays saved.
                    self.store.set_token(&credential.token)?;
                    self.store.set_base_url(&credential.base_url)?;
                    let connected = self.connector.connect(&credential);
                    let outcome = api::list_projects().send(connected.as_ref()).await;
                    transport = Some(connected);
                    Event::CallCompleted(outcome)
                }
                Effect::Fetch(request) => {
                    debug!(path = %request.path, "Fetching listing");
                    let outcome = match transport.as_deref() {
                        Some(transport) => request.send(transport).await,
                        None => Outcome::TransportFailure("Not connected".to_string()),
                    };
                    Event::CallCompleted(outcome)
                }
                Effect::None => match state.pending_input() {
                    Some(PendingInput::Token) => {
                        Event::TokenSubmitted(self.prompter.password("Token")?)
                    }
                    Some(PendingInput::BaseUrl(default)) => {
                        Event::BaseUrlSubmitted(self.prompter.input("Base URL", &default)?)
                    }
                    Some(PendingInput::Select { prompt, labels }) => {
                        Event::Selected(self.prompter.select(prompt, &labels)?)
                    }
                    None => return Ok(exit_for(&state)),
                },
            };
            effect = state.update(event);
        }
    }

    fn draw(&mut self, state: &ViewState) -> Result<(), GwirianError> {
        if self.config.stdout_is_tty {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        writeln!(self.out, "{}", view::render(state))?;
        self.out.flush()?;
        Ok(())
    }
}

fn exit_for(state: &ViewState) -> Exit {
    if state.error.is_some() {
        Exit::Failure
    } else {
        Exit::Success
    }
}
