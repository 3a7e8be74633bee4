//! CLI parse: clap types for gwirian. No behavior; definitions only.

use crate::api::{FeatureBody, ScenarioBody, ScenarioExecutionBody};
use crate::install::InstallTarget;
use clap::{Args, Parser, Subcommand};

/// Gwirian CLI - projects, features and scenarios from the terminal
#[derive(Parser, Debug)]
#[command(name = "gwirian", version)]
#[command(about = "CLI for the Gwirian API with an interactive terminal browser")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override base URL for this run
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output raw JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging on stderr (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Set API token (prompted, optionally test connection)
    Auth {
        /// Test token with a projects request
        #[arg(short, long)]
        test: bool,
    },
    /// Clear stored API token
    Logout,
    /// View or set configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Install the gwirian-cli skill for Cursor and/or Claude
    Install {
        /// Install the gwirian-cli skill
        #[arg(long)]
        skills: bool,
        /// Target directory: .cursor, .claude, or both
        #[arg(short, long, value_enum, default_value = "both")]
        target: InstallTarget,
        /// Install to the user's home directory instead of the current one
        #[arg(short, long)]
        global: bool,
    },
    /// List, show or search projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// List, show, create, update, or delete features
    Features {
        #[command(subcommand)]
        command: FeatureCommands,
    },
    /// List, show, create, update, or delete scenarios
    Scenarios {
        #[command(subcommand)]
        command: ScenarioCommands,
    },
    /// List, show, create, update, or delete scenario executions
    ScenarioExecutions {
        #[command(subcommand)]
        command: ScenarioExecutionCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommands {
    /// Show base URL and token status
    Get,
    /// Set a config value
    Set {
        #[command(subcommand)]
        command: ConfigSetCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigSetCommands {
    /// Set API base URL
    BaseUrl {
        /// API base URL
        url: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProjectCommands {
    /// List projects
    List,
    /// Show project details
    Show {
        /// Project ID
        project_id: String,
    },
    /// Search features and scenarios in a project
    Search {
        /// Project ID
        project_id: String,
        /// Search text
        query: String,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FeatureArgs {
    /// Title
    #[arg(long)]
    pub title: Option<String>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
    /// Tag list
    #[arg(long)]
    pub tag_list: Option<String>,
}

impl From<&FeatureArgs> for FeatureBody {
    fn from(args: &FeatureArgs) -> Self {
        FeatureBody {
            title: args.title.clone(),
            description: args.description.clone(),
            tag_list: args.tag_list.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FeatureCommands {
    /// List features
    List { project_id: String },
    /// Show feature
    Show {
        project_id: String,
        feature_id: String,
    },
    /// Create feature
    Create {
        project_id: String,
        #[command(flatten)]
        fields: FeatureArgs,
    },
    /// Update feature
    Update {
        project_id: String,
        feature_id: String,
        #[command(flatten)]
        fields: FeatureArgs,
    },
    /// Delete feature
    Delete {
        project_id: String,
        feature_id: String,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ScenarioArgs {
    /// Title
    #[arg(long)]
    pub title: Option<String>,
    /// Given
    #[arg(long)]
    pub given: Option<String>,
    /// When
    #[arg(long)]
    pub when: Option<String>,
    /// Then
    #[arg(long)]
    pub then: Option<String>,
    /// Position
    #[arg(long)]
    pub position: Option<i64>,
}

impl From<&ScenarioArgs> for ScenarioBody {
    fn from(args: &ScenarioArgs) -> Self {
        ScenarioBody {
            title: args.title.clone(),
            given: args.given.clone(),
            when: args.when.clone(),
            then: args.then.clone(),
            position: args.position,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ScenarioCommands {
    /// List scenarios
    List {
        project_id: String,
        feature_id: String,
    },
    /// Show scenario
    Show {
        project_id: String,
        feature_id: String,
        scenario_id: String,
    },
    /// Create scenario
    Create {
        project_id: String,
        feature_id: String,
        #[command(flatten)]
        fields: ScenarioArgs,
    },
    /// Update scenario
    Update {
        project_id: String,
        feature_id: String,
        scenario_id: String,
        #[command(flatten)]
        fields: ScenarioArgs,
    },
    /// Delete scenario
    Delete {
        project_id: String,
        feature_id: String,
        scenario_id: String,
    },
}

/// Accept RFC 3339 timestamps, local ISO date-times (optional fractional
/// seconds) or plain `YYYY-MM-DD` dates; pass the text through.
fn parse_timestamp(value: &str) -> Result<String, String> {
    let valid = chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    if valid {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{}' is not an ISO date (expected YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or RFC 3339)",
            value
        ))
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ScenarioExecutionArgs {
    /// Status
    #[arg(long)]
    pub status: Option<String>,
    /// Notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Executed at (ISO date)
    #[arg(long, value_parser = parse_timestamp)]
    pub executed_at: Option<String>,
    /// Tag list
    #[arg(long)]
    pub tag_list: Option<String>,
}

impl From<&ScenarioExecutionArgs> for ScenarioExecutionBody {
    fn from(args: &ScenarioExecutionArgs) -> Self {
        ScenarioExecutionBody {
            status: args.status.clone(),
            notes: args.notes.clone(),
            executed_at: args.executed_at.clone(),
            tag_list: args.tag_list.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ScenarioExecutionCommands {
    /// List scenario executions
    List {
        project_id: String,
        feature_id: String,
        scenario_id: String,
    },
    /// Show scenario execution
    Show {
        project_id: String,
        feature_id: String,
        scenario_id: String,
        execution_id: String,
    },
    /// Create scenario execution
    Create {
        project_id: String,
        feature_id: String,
        scenario_id: String,
        #[command(flatten)]
        fields: ScenarioExecutionArgs,
    },
    /// Update scenario execution
    Update {
        project_id: String,
        feature_id: String,
        scenario_id: String,
        execution_id: String,
        #[command(flatten)]
        fields: ScenarioExecutionArgs,
    },
    /// Delete scenario execution
    Delete {
        project_id: String,
        feature_id: String,
        scenario_id: String,
        execution_id: String,
    },
}
