//! Frame rendering. A pure function of [`ViewState`]; the driver decides
//! when and where the frame is written.

use super::state::{Screen, SetupStep, Stage, ViewState};
use owo_colors::OwoColorize;
use serde_json::Value;

/// Render the whole frame for `state`.
pub fn render(state: &ViewState) -> String {
    let mut lines = Vec::new();
    match state.screen {
        Screen::Setup(step) => setup(state, step, &mut lines),
        Screen::Browse(stage) => browse(state, stage, &mut lines),
    }
    lines.join("\n")
}

fn setup(state: &ViewState, step: SetupStep, lines: &mut Vec<String>) {
    if step == SetupStep::Done {
        lines.push(
            "Configuration saved. You can now run \"gwirian\" again to open the TUI."
                .green()
                .to_string(),
        );
        return;
    }

    lines.push("Gwirian CLI – Configuration".bold().to_string());
    lines.push(
        "Enter your API token and base URL (optional)."
            .dimmed()
            .to_string(),
    );
    if let Some(error) = &state.error {
        lines.push(error.red().to_string());
    }
    match step {
        SetupStep::AwaitToken => lines.push("Token:".to_string()),
        SetupStep::AwaitBaseUrl => {
            lines.push("Base URL:".to_string());
            lines.push(
                "Press Enter to save and test connection."
                    .dimmed()
                    .to_string(),
            );
        }
        SetupStep::Testing => lines.push("Testing connection...".yellow().to_string()),
        SetupStep::Done => {}
    }
}

fn browse(state: &ViewState, stage: Stage, lines: &mut Vec<String>) {
    if let Some(error) = &state.error {
        lines.push(error.red().to_string());
        return;
    }
    if state.loading {
        lines.push(format!("Loading {}", stage.noun()));
        return;
    }
    if state.items.is_empty() {
        lines.push(
            match stage {
                Stage::Projects => "No projects found.",
                Stage::Features => "No features in this project.",
                Stage::Scenarios => "No scenarios in this feature.",
            }
            .to_string(),
        );
        return;
    }
    match stage {
        Stage::Projects => lines.push("Select a project".bold().to_string()),
        Stage::Features => lines.push("Select a feature".bold().to_string()),
        Stage::Scenarios => {
            lines.push("Scenarios".bold().to_string());
            for scenario in &state.items {
                scenario_block(scenario, lines);
            }
        }
    }
}

fn scenario_block(scenario: &Value, lines: &mut Vec<String>) {
    let title = match scenario.get("title").and_then(Value::as_str) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => format!(
            "Scenario #{}",
            super::state::record_id(scenario).unwrap_or_default()
        ),
    };
    lines.push(String::new());
    lines.push(title.bold().to_string());
    for (field, label) in [("given", "Given"), ("when", "When"), ("then", "Then")] {
        if let Some(text) = scenario.get(field).and_then(Value::as_str) {
            if !text.is_empty() {
                lines.push(format!("{}: {}", label, text).dimmed().to_string());
            }
        }
    }
}
