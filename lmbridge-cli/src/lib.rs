pub mod cli;
pub mod commands;
pub mod report;
pub mod selector;

pub use cli::{Cli, Command};
pub use selector::{Choice, TerminalSelector, parse_choice};

use lmbridge_core::integration::LaunchConfigError;
use lmbridge_core::mcp::McpError;
use lmbridge_core::{BridgeSettings, ConfigError, SettingsOverrides};
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    LaunchConfig(#[from] LaunchConfigError),
    #[error(transparent)]
    Mcp(#[from] McpError),
}

pub async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let serving = matches!(cli.command, Command::Mcp(_));
    init_tracing(serving);
    debug!(command = ?cli.command, config = ?cli.config, "CLI arguments parsed");

    let overrides = overrides_from(&cli);
    let settings = BridgeSettings::load(cli.config.as_deref(), &overrides)?;
    info!(
        base_url = settings.base_url.as_str(),
        model = ?settings.model(),
        "Settings resolved"
    );

    match &cli.command {
        Command::Diagnose(args) => Ok(commands::diagnose::run(&settings, args).await),
        Command::Setup(_) => commands::setup::run(&settings).await,
        Command::Test => Ok(commands::test::run(&settings).await),
        Command::Mcp(_) => commands::mcp::run(&settings).await,
    }
}

/// Command-line values that take precedence over file and environment
pub fn overrides_from(cli: &Cli) -> SettingsOverrides {
    let mut overrides = SettingsOverrides {
        base_url: cli.base_url.clone(),
        reachability_timeout: cli.timeout.map(Duration::from_secs),
        completion_timeout: cli.completion_timeout.map(Duration::from_secs),
        ..SettingsOverrides::default()
    };
    match &cli.command {
        Command::Setup(args) => {
            overrides.model = args.model.clone();
            overrides.launch_config_path = args.output.clone();
        }
        Command::Mcp(args) => overrides.model = args.model.clone(),
        Command::Diagnose(_) | Command::Test => {}
    }
    overrides
}

/// Logs always go to stderr; `serving` raises the default level because
/// stdout belongs to the JSON-RPC stream and nothing else is printed.
fn init_tracing(serving: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let default_level = if serving { "info" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
