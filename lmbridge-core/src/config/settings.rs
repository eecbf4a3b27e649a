use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_COMPLETION_TIMEOUT, DEFAULT_LAUNCH_CONFIG_PATH,
    DEFAULT_REACHABILITY_TIMEOUT, PLACEHOLDER_API_KEY,
};
use crate::domain::ServerEndpoint;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::ConfigError;

/// Resolved settings shared by the CLI commands and the MCP server
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: Option<String>,
    pub reachability_timeout: Duration,
    pub completion_timeout: Duration,
    pub launch_config_path: PathBuf,
    /// Command the launch config starts; `None` means the running executable
    pub server_command: Option<String>,
    pub server_args: Vec<String>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            model: None,
            reachability_timeout: DEFAULT_REACHABILITY_TIMEOUT,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            launch_config_path: expand_path(DEFAULT_LAUNCH_CONFIG_PATH),
            server_command: None,
            server_args: vec!["mcp".to_string()],
        }
    }
}

impl BridgeSettings {
    /// Load settings: defaults, then the TOML file, then environment, then overrides
    pub fn load(path: Option<&Path>, overrides: &SettingsOverrides) -> Result<Self, ConfigError> {
        super::loader::load_settings(path, overrides)
    }

    pub fn endpoint(&self) -> ServerEndpoint {
        ServerEndpoint::new(self.base_url.clone())
    }

    /// Configured model id, ignoring blank values
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.trim().is_empty())
    }

    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(model) = &overrides.model {
            self.model = Some(model.clone());
        }
        if let Some(timeout) = overrides.reachability_timeout {
            self.reachability_timeout = timeout;
        }
        if let Some(timeout) = overrides.completion_timeout {
            self.completion_timeout = timeout;
        }
        if let Some(path) = &overrides.launch_config_path {
            self.launch_config_path = expand_path(&path.to_string_lossy());
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.reachability_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                field: "reachability_timeout",
            });
        }
        if self.completion_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                field: "completion_timeout",
            });
        }
        Ok(())
    }
}

/// Values supplied on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub reachability_timeout: Option<Duration>,
    pub completion_timeout: Option<Duration>,
    pub launch_config_path: Option<PathBuf>,
}

pub(crate) fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::full(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    PathBuf::from(expanded)
}
