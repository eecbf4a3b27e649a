//! Discovery and capability probing for local OpenAI-compatible inference
//! servers, plus the pieces needed to wire one up for a tool-calling agent.
//!
//! The layering follows the rest of the workspace:
//!
//! - [`domain`]: endpoint and model types shared by every layer
//! - [`infrastructure`]: the HTTP probe and JSON-RPC wire types
//! - [`application`]: port scanning, host diagnostics, model selection,
//!   launch-config output and the MCP stdio server
//! - [`config`]: settings resolved from defaults, TOML, environment and flags

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{discovery, integration, mcp, selection};
pub use config::{BridgeSettings, ConfigError, SettingsOverrides};
pub use domain::{ModelDescriptor, ServerEndpoint};
pub use infrastructure::probe::{
    CompletionCheck, CompletionRequest, FailureKind, InferenceBackend, InferenceServerProbe,
    ProbeError, ProbeResult,
};
pub use infrastructure::rpc;
