use super::error::ConfigError;
use super::settings::{BridgeSettings, SettingsOverrides, expand_path};
use crate::constants::{CONFIG_PATH, ENV_BASE_URL, ENV_MODEL, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw settings structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawSettings {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub reachability_timeout_secs: Option<u64>,
    pub completion_timeout_secs: Option<u64>,
    #[serde(default)]
    pub launch: RawLaunch,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawLaunch {
    pub path: Option<String>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load settings from an explicit path, or the default path when present
pub fn load_settings(
    path: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<BridgeSettings, ConfigError> {
    ensure_env_loaded();

    let raw = match path {
        Some(path) => read_settings(path)?,
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_settings(default_path)?
            } else {
                debug!(path = CONFIG_PATH, "No settings file, using defaults");
                RawSettings::default()
            }
        }
    };

    let mut settings = BridgeSettings::default();
    apply_raw(&mut settings, raw);
    apply_env(&mut settings, |key| env::var(key).ok());
    settings.apply_overrides(overrides);
    settings.validate()?;
    Ok(settings)
}

fn read_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    debug!(path = %path.display(), "Reading settings file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_settings(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn parse_settings(content: &str) -> Result<RawSettings, toml::de::Error> {
    toml::from_str(content)
}

pub(super) fn apply_raw(settings: &mut BridgeSettings, raw: RawSettings) {
    if let Some(base_url) = raw.base_url {
        settings.base_url = base_url;
    }
    if raw.model.is_some() {
        settings.model = raw.model;
    }
    if let Some(secs) = raw.reachability_timeout_secs {
        settings.reachability_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = raw.completion_timeout_secs {
        settings.completion_timeout = Duration::from_secs(secs);
    }
    if let Some(path) = raw.launch.path {
        settings.launch_config_path = expand_path(&path);
    }
    if raw.launch.command.is_some() {
        settings.server_command = raw.launch.command;
    }
    if let Some(args) = raw.launch.args {
        settings.server_args = args;
    }
}

/// Apply `LM_STUDIO_*` variables; blank values are ignored
pub(super) fn apply_env<F>(settings: &mut BridgeSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = non_blank(ENV_BASE_URL) {
        debug!(base_url = base_url.as_str(), "Base URL taken from environment");
        settings.base_url = base_url;
    }
    if let Some(model) = non_blank(ENV_MODEL) {
        debug!(model = model.as_str(), "Model taken from environment");
        settings.model = Some(model);
    }
}
