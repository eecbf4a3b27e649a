use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lmbridge_core::discovery::{DEFAULT_PORTS, DEFAULT_SCAN_HOST};

#[derive(Parser, Debug)]
#[command(
    name = "lmbridge",
    version,
    about = "Discover, test and wire up a local LM Studio server for MCP agents"
)]
pub struct Cli {
    /// Base URL of the inference server (overrides LM_STUDIO_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Settings file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
    /// Reachability timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
    /// Completion timeout in seconds
    #[arg(long, global = true)]
    pub completion_timeout: Option<u64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan ports and probe every open one for an OpenAI-compatible API
    Diagnose(DiagnoseArgs),
    /// Pick a model, verify it and write the MCP launch config
    Setup(SetupArgs),
    /// Verify every loaded chat model with a short prompt
    Test,
    /// Serve the LM Studio tools over stdio (MCP)
    Mcp(McpArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DiagnoseArgs {
    /// Host to scan
    #[arg(long, default_value = DEFAULT_SCAN_HOST)]
    pub host: String,
    /// Ports to scan, in probe order
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_PORTS.to_vec())]
    pub ports: Vec<u16>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupArgs {
    /// Model id to use instead of asking
    #[arg(long)]
    pub model: Option<String>,
    /// Where to write the launch config
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct McpArgs {
    /// Model id the chat_completion tool uses (overrides LM_STUDIO_MODEL)
    #[arg(long)]
    pub model: Option<String>,
}
