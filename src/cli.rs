//! CLI domain: parse, route and output only.
//! Single route table dispatches each command to one handler.

mod output;
mod parse;
mod route;

pub use output::{map_failure, Console, TOKEN_INVALID_MESSAGE};
pub use parse::{
    Cli, Commands, ConfigCommands, ConfigSetCommands, FeatureArgs, FeatureCommands,
    ProjectCommands, ScenarioArgs, ScenarioCommands, ScenarioExecutionArgs,
    ScenarioExecutionCommands,
};
pub use route::{plan, CommandSession, Invocation, Presentation};
