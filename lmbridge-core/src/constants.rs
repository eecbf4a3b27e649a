//! Application constants
//!
//! Single source of truth for paths, defaults and wire paths.

use std::time::Duration;

/// Default settings file path
pub const CONFIG_PATH: &str = "config/lmbridge.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Default base URL of a local LM Studio server
pub const DEFAULT_BASE_URL: &str = "http://localhost:1234";

/// Placeholder credential LM Studio accepts for every request
pub const PLACEHOLDER_API_KEY: &str = "lm-studio";

/// Model-listing path relative to the base URL
pub const MODELS_PATH: &str = "/v1/models";

/// Chat-completion path relative to the base URL
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Timeout for the lightweight reachability probe
pub const DEFAULT_REACHABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for a completion request; generation is slower than listing
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default destination of the generated MCP launch config
pub const DEFAULT_LAUNCH_CONFIG_PATH: &str = "~/.claude/mcp.json";

/// Name of the integration entry in the launch config
pub const INTEGRATION_NAME: &str = "lmstudio";

/// Environment variable carrying the server base URL
pub const ENV_BASE_URL: &str = "LM_STUDIO_BASE_URL";

/// Environment variable carrying the configured model id
pub const ENV_MODEL: &str = "LM_STUDIO_MODEL";
