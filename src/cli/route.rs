//! CLI route: the command session. One route table maps each parsed command
//! to a handler; resource commands become exactly one API request.
//!
//! Flow per resource command: resolve credential (or stop with
//! `AuthRequired` before any network call), send one request, then render the
//! value or print the classified failure. The returned [`Exit`] is the only
//! thing the binary needs.

use crate::api::{self, Request};
use crate::cli::output::Console;
use crate::cli::parse::{
    Commands, ConfigCommands, ConfigSetCommands, FeatureCommands, ProjectCommands,
    ScenarioCommands, ScenarioExecutionCommands,
};
use crate::config::{CredentialStore, SessionConfig};
use crate::error::{Exit, Failure};
use crate::install::{self, InstallTarget};
use crate::render::TableOptions;
use crate::transport::{Connector, Outcome};
use crate::tui::Prompter;
use serde_json::Value;
use tracing::{info, warn};

const PROJECT_COLUMNS: &[&str] = &["id", "name", "description"];
const SEARCH_COLUMNS: &[&str] = &["type", "id", "title", "status"];
const FEATURE_COLUMNS: &[&str] = &["id", "title", "description"];
const SCENARIO_COLUMNS: &[&str] = &["id", "title", "given", "when", "then"];
const EXECUTION_COLUMNS: &[&str] = &["id", "status", "notes", "executed_at"];

/// What to do with a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// Render the value; `field` picks a nested array out of an object body.
    Render {
        columns: &'static [&'static str],
        options: TableOptions,
        field: Option<&'static str>,
    },
    /// Print a fixed line and ignore the body.
    Confirm(&'static str),
}

impl Presentation {
    fn single() -> Self {
        Presentation::Render {
            columns: &[],
            options: TableOptions::default(),
            field: None,
        }
    }

    fn list(columns: &'static [&'static str]) -> Self {
        Presentation::Render {
            columns,
            options: TableOptions::default(),
            field: None,
        }
    }
}

/// One request plus how its result is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub request: Request,
    pub presentation: Presentation,
}

impl Invocation {
    fn new(request: Request, presentation: Presentation) -> Self {
        Self {
            request,
            presentation,
        }
    }
}

/// Map a resource command to its single API call. Local commands (auth,
/// config, install) have no invocation.
pub fn plan(command: &Commands) -> Option<Invocation> {
    let invocation = match command {
        Commands::Projects { command } => match command {
            ProjectCommands::List => {
                Invocation::new(api::list_projects(), Presentation::list(PROJECT_COLUMNS))
            }
            ProjectCommands::Show { project_id } => {
                Invocation::new(api::get_project(project_id), Presentation::single())
            }
            ProjectCommands::Search {
                project_id,
                query,
                limit,
            } => Invocation::new(
                api::search_project(project_id, query, *limit),
                Presentation::Render {
                    columns: SEARCH_COLUMNS,
                    options: TableOptions::default(),
                    field: Some("results"),
                },
            ),
        },
        Commands::Features { command } => match command {
            FeatureCommands::List { project_id } => Invocation::new(
                api::list_features(project_id),
                Presentation::list(FEATURE_COLUMNS),
            ),
            FeatureCommands::Show {
                project_id,
                feature_id,
            } => Invocation::new(
                api::get_feature(project_id, feature_id),
                Presentation::single(),
            ),
            FeatureCommands::Create { project_id, fields } => Invocation::new(
                api::create_feature(project_id, &fields.into()),
                Presentation::single(),
            ),
            FeatureCommands::Update {
                project_id,
                feature_id,
                fields,
            } => Invocation::new(
                api::update_feature(project_id, feature_id, &fields.into()),
                Presentation::single(),
            ),
            FeatureCommands::Delete {
                project_id,
                feature_id,
            } => Invocation::new(
                api::delete_feature(project_id, feature_id),
                Presentation::Confirm("Feature deleted."),
            ),
        },
        Commands::Scenarios { command } => match command {
            ScenarioCommands::List {
                project_id,
                feature_id,
            } => Invocation::new(
                api::list_scenarios(project_id, feature_id),
                Presentation::Render {
                    columns: SCENARIO_COLUMNS,
                    options: TableOptions {
                        word_wrap: true,
                        col_widths: vec![6, 26, 28, 28, 28],
                    },
                    field: None,
                },
            ),
            ScenarioCommands::Show {
                project_id,
                feature_id,
                scenario_id,
            } => Invocation::new(
                api::get_scenario(project_id, feature_id, scenario_id),
                Presentation::single(),
            ),
            ScenarioCommands::Create {
                project_id,
                feature_id,
                fields,
            } => Invocation::new(
                api::create_scenario(project_id, feature_id, &fields.into()),
                Presentation::single(),
            ),
            ScenarioCommands::Update {
                project_id,
                feature_id,
                scenario_id,
                fields,
            } => Invocation::new(
                api::update_scenario(project_id, feature_id, scenario_id, &fields.into()),
                Presentation::single(),
            ),
            ScenarioCommands::Delete {
                project_id,
                feature_id,
                scenario_id,
            } => Invocation::new(
                api::delete_scenario(project_id, feature_id, scenario_id),
                Presentation::Confirm("Scenario deleted."),
            ),
        },
        Commands::ScenarioExecutions { command } => match command {
            ScenarioExecutionCommands::List {
                project_id,
                feature_id,
                scenario_id,
            } => Invocation::new(
                api::list_scenario_executions(project_id, feature_id, scenario_id),
                Presentation::list(EXECUTION_COLUMNS),
            ),
            ScenarioExecutionCommands::Show {
                project_id,
                feature_id,
                scenario_id,
                execution_id,
            } => Invocation::new(
                api::get_scenario_execution(project_id, feature_id, scenario_id, execution_id),
                Presentation::single(),
            ),
            ScenarioExecutionCommands::Create {
                project_id,
                feature_id,
                scenario_id,
                fields,
            } => Invocation::new(
                api::create_scenario_execution(project_id, feature_id, scenario_id, &fields.into()),
                Presentation::single(),
            ),
            ScenarioExecutionCommands::Update {
                project_id,
                feature_id,
                scenario_id,
                execution_id,
                fields,
            } => Invocation::new(
                api::update_scenario_execution(
                    project_id,
                    feature_id,
                    scenario_id,
                    execution_id,
                    &fields.into(),
                ),
                Presentation::single(),
            ),
            ScenarioExecutionCommands::Delete {
                project_id,
                feature_id,
                scenario_id,
                execution_id,
            } => Invocation::new(
                api::delete_scenario_execution(project_id, feature_id, scenario_id, execution_id),
                Presentation::Confirm("Scenario execution deleted."),
            ),
        },
        Commands::Auth { .. }
        | Commands::Logout
        | Commands::Config { .. }
        | Commands::Install { .. } => return None,
    };
    Some(invocation)
}

/// Non-interactive session: runs one command and reports its exit status.
pub struct CommandSession<'a> {
    config: &'a SessionConfig,
    store: &'a CredentialStore,
    connector: &'a dyn Connector,
    prompter: &'a mut dyn Prompter,
    console: Console<'a>,
}

impl<'a> CommandSession<'a> {
    pub fn new(
        config: &'a SessionConfig,
        store: &'a CredentialStore,
        connector: &'a dyn Connector,
        prompter: &'a mut dyn Prompter,
        console: Console<'a>,
    ) -> Self {
        Self {
            config,
            store,
            connector,
            prompter,
            console,
        }
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&mut self, command: &Commands) -> Exit {
        let result = match command {
            Commands::Auth { test } => self.handle_auth(*test).await,
            Commands::Logout => self.handle_logout(),
            Commands::Config { command } => self.handle_config(command),
            Commands::Install {
                skills,
                target,
                global,
            } => self.handle_install(*skills, *target, *global),
            resource => match plan(resource) {
                Some(invocation) => self.invoke(invocation).await,
                None => Ok(Exit::Success),
            },
        };

        match result {
            Ok(exit) => exit,
            Err(failure) => {
                warn!(title = failure.title(), status = ?failure.status_code(), "Command failed");
                self.console.failure(&failure);
                Exit::Failure
            }
        }
    }

    /// Resolve the credential, send the one request, present the result.
    pub async fn invoke(&mut self, invocation: Invocation) -> Result<Exit, Failure> {
        let credential = self.config.resolve(&self.store.load())?;
        let request = &invocation.request;
        info!(method = request.method.as_str(), path = %request.path, "Invoking API");

        let transport = self.connector.connect(&credential);
        let value = request.send(transport.as_ref()).await.into_result()?;

        match invocation.presentation {
            Presentation::Confirm(line) => self.console.line(line),
            Presentation::Render {
                columns,
                options,
                field,
            } => {
                let data = value.unwrap_or(Value::Null);
                let data = match field {
                    Some(name) if !self.config.json => match data.get(name) {
                        Some(inner) => inner.clone(),
                        None => data,
                    },
                    _ => data,
                };
                self.console.value(&data, self.config.json, columns, &options);
            }
        }
        Ok(Exit::Success)
    }

    async fn handle_auth(&mut self, test: bool) -> Result<Exit, Failure> {
        let token = self.prompter.password("Token")?;
        let token = token.trim();
        if token.is_empty() {
            self.console.error("Auth", "Token cannot be empty.", None);
            return Ok(Exit::Failure);
        }
        self.store.set_token(token)?;
        self.console.line("Token saved.");

        if !test {
            return Ok(Exit::Success);
        }

        let credential = self.config.resolve(&self.store.load())?;
        let transport = self.connector.connect(&credential);
        match api::list_projects().send(transport.as_ref()).await {
            Outcome::Success(_) => {
                self.console.line("Connection successful.");
                Ok(Exit::Success)
            }
            Outcome::AuthFailure => {
                self.console.error("Auth", "Token is invalid or expired.", None);
                Ok(Exit::Failure)
            }
            other => {
                let message = match other.into_result() {
                    Err(failure) => failure.to_string(),
                    Ok(_) => String::new(),
                };
                self.console.error(
                    "Connection failed",
                    &format!("Connection failed: {}", message),
                    None,
                );
                Ok(Exit::Failure)
            }
        }
    }

    fn handle_logout(&mut self) -> Result<Exit, Failure> {
        self.store.clear_token()?;
        self.console.line("Token cleared.");
        Ok(Exit::Success)
    }

    fn handle_config(&mut self, command: &ConfigCommands) -> Result<Exit, Failure> {
        match command {
            ConfigCommands::Get => {
                let stored = self.store.load();
                self.console.line(&format!("Base URL: {}", stored.base_url));
                self.console.line(&format!(
                    "Token: {}",
                    if stored.has_token() { "set" } else { "not set" }
                ));
            }
            ConfigCommands::Set {
                command: ConfigSetCommands::BaseUrl { url },
            } => {
                self.store.set_base_url(url)?;
                self.console.line(&format!("Base URL set to: {}", url));
            }
        }
        Ok(Exit::Success)
    }

    fn handle_install(
        &mut self,
        skills: bool,
        target: InstallTarget,
        global: bool,
    ) -> Result<Exit, Failure> {
        if !skills {
            self.console
                .line("Use --skills to install the gwirian-cli skill.");
            return Ok(Exit::Success);
        }
        let installed = install::base_dir(global)
            .and_then(|base| install::install_skill(target, &base));
        match installed {
            Ok(labels) => {
                for label in labels {
                    self.console.line(&format!("Skill installed to {}", label));
                }
                Ok(Exit::Success)
            }
            Err(e) => {
                self.console.error("Install", &e.to_string(), None);
                Ok(Exit::Failure)
            }
        }
    }
}
