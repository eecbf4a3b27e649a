//! MCP launch config
//!
//! The agent framework starts MCP servers from a JSON file mapping an
//! integration name to a command, its arguments and its environment. This
//! module builds that document for the bridge and writes it out.

use crate::config::BridgeSettings;
use crate::constants::{ENV_BASE_URL, ENV_MODEL, INTEGRATION_NAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LaunchConfigError {
    #[error("cannot determine the path of the running executable: {source}")]
    CurrentExe {
        #[source]
        source: io::Error,
    },
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write launch config to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode launch config: {0}")]
    Encode(#[from] serde_json::Error),
}

/// How to start one MCP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchEntry {
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

/// Integration name to launch entry, serialized as a flat JSON object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchConfig {
    pub entries: BTreeMap<String, LaunchEntry>,
}

impl LaunchConfig {
    /// Single `lmstudio` entry pointing the bridge at `base_url` and `model_id`
    pub fn for_model(
        command: impl Into<String>,
        args: Vec<String>,
        base_url: &str,
        model_id: &str,
    ) -> Self {
        let env = BTreeMap::from([
            (ENV_BASE_URL.to_string(), base_url.to_string()),
            (ENV_MODEL.to_string(), model_id.to_string()),
        ]);
        let entry = LaunchEntry {
            command: command.into(),
            args,
            env,
        };
        Self {
            entries: BTreeMap::from([(INTEGRATION_NAME.to_string(), entry)]),
        }
    }

    /// Build from settings; the command defaults to the running executable
    pub fn from_settings(settings: &BridgeSettings, model_id: &str) -> Result<Self, LaunchConfigError> {
        let command = match &settings.server_command {
            Some(command) => command.clone(),
            None => std::env::current_exe()
                .map_err(|source| LaunchConfigError::CurrentExe { source })?
                .to_string_lossy()
                .into_owned(),
        };
        Ok(Self::for_model(
            command,
            settings.server_args.clone(),
            &settings.base_url,
            model_id,
        ))
    }

    pub fn entry(&self, name: &str) -> Option<&LaunchEntry> {
        self.entries.get(name)
    }

    pub fn to_json_pretty(&self) -> Result<String, LaunchConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty JSON to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<(), LaunchConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LaunchConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut content = self.to_json_pretty()?;
        content.push('\n');
        fs::write(path, content).map_err(|source| LaunchConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), entries = self.entries.len(), "Launch config written");
        Ok(())
    }
}
