//! Gwirian CLI Binary
//!
//! Command-line client and interactive browser for the Gwirian API.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use gwirian::cli::{Cli, CommandSession, Console};
use gwirian::config::{ConfigLoader, CredentialStore, SessionConfig};
use gwirian::error::Exit;
use gwirian::logging::{init_logging, LoggingConfig};
use gwirian::transport::HttpConnector;
use gwirian::tui::{navigation_allowed, DialoguerPrompter, LinePrompter, Navigator, Prompter};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(e) => {
            error!("Start-up failed: {:#}", e);
            eprintln!("{:#}", e);
            ExitCode::from(Exit::Failure.code())
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Exit> {
    let logging_config = build_logging_config(&cli);
    init_logging(&logging_config).context("Failed to initialize logging")?;
    info!("Gwirian CLI starting");

    let config = SessionConfig::detect(cli.base_url.clone(), cli.json);
    let store = CredentialStore::default_location().context("Failed to locate config directory")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    // dialoguer needs a terminal; piped stdin is read line by line.
    let mut prompter: Box<dyn Prompter> = if config.stdin_is_tty {
        Box::new(DialoguerPrompter)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock()))
    };
    let connector = HttpConnector;
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let Some(command) = cli.command else {
        if !navigation_allowed(std::env::args_os().len(), config.stdin_is_tty) {
            Cli::command().print_help()?;
            return Ok(Exit::Success);
        }
        let mut navigator =
            Navigator::new(&config, &store, &connector, prompter.as_mut(), &mut stdout);
        let exit = runtime.block_on(navigator.run()).context("Navigation aborted")?;
        return Ok(exit);
    };

    let console = Console::for_session(&mut stdout, &mut stderr, &config);
    let mut session = CommandSession::new(&config, &store, &connector, prompter.as_mut(), console);
    let exit = runtime.block_on(session.execute(&command));
    info!(exit = exit.code(), "Command completed");
    Ok(exit)
}

/// Logging stays off unless a flag, the settings file or `GWIRIAN_LOG` asks for it.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load()
        .map(|settings| settings.logging)
        .unwrap_or_default();

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
