use std::process::ExitCode;

use lmbridge_core::mcp::{LmStudioTools, McpServer, run_stdio};
use lmbridge_core::{BridgeSettings, InferenceServerProbe};
use tracing::{info, warn};

use crate::CliError;

/// Serve the tools on stdio until stdin closes; stdout carries only JSON-RPC
pub async fn run(settings: &BridgeSettings) -> Result<ExitCode, CliError> {
    let probe = InferenceServerProbe::from_settings(settings);
    let tools = LmStudioTools::new(probe, settings.endpoint(), settings.model.clone());
    match tools.model() {
        Some(model) => info!(base_url = settings.base_url.as_str(), model, "Starting MCP server"),
        None => warn!(
            base_url = settings.base_url.as_str(),
            "Starting MCP server without a model; chat_completion will fail"
        ),
    }

    let server = McpServer::new(tools);
    run_stdio(&server).await?;
    Ok(ExitCode::SUCCESS)
}
