// Settings tests - BridgeSettings::load precedence and error handling
//
// Precedence: defaults < TOML file < LM_STUDIO_* environment < CLI overrides.
// Tests touching the process environment run serially.

use lmbridge_core::constants::{
    DEFAULT_BASE_URL, DEFAULT_COMPLETION_TIMEOUT, DEFAULT_REACHABILITY_TIMEOUT, ENV_BASE_URL,
    ENV_MODEL,
};
use lmbridge_core::{BridgeSettings, ConfigError, SettingsOverrides};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

fn write_settings(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("lmbridge.toml");
    fs::write(&path, content).expect("Failed to write lmbridge.toml");
    path
}

fn clear_env() {
    unsafe {
        env::remove_var(ENV_BASE_URL);
        env::remove_var(ENV_MODEL);
    }
}

fn set_env(key: &str, value: &str) {
    unsafe {
        env::set_var(key, value);
    }
}

const FULL_FILE: &str = r#"
base_url = "http://192.168.1.45:1234"
model = "qwen2.5-7b-instruct"
reachability_timeout_secs = 2
completion_timeout_secs = 15

[launch]
path = "/tmp/lmbridge/mcp.json"
command = "/usr/local/bin/lmbridge"
args = ["mcp", "--model", "qwen2.5-7b-instruct"]
"#;

// ============================================================================
// File loading
// ============================================================================

#[test]
#[serial]
fn missing_explicit_file_is_not_found() {
    clear_env();
    let result = BridgeSettings::load(
        Some(Path::new("/nonexistent/lmbridge.toml")),
        &SettingsOverrides::default(),
    );
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
#[serial]
fn file_values_replace_defaults() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = write_settings(dir.path(), FULL_FILE);

    let settings = BridgeSettings::load(Some(&path), &SettingsOverrides::default()).expect("load");

    assert_eq!(settings.base_url, "http://192.168.1.45:1234");
    assert_eq!(settings.model(), Some("qwen2.5-7b-instruct"));
    assert_eq!(settings.reachability_timeout, Duration::from_secs(2));
    assert_eq!(settings.completion_timeout, Duration::from_secs(15));
    assert_eq!(settings.launch_config_path, PathBuf::from("/tmp/lmbridge/mcp.json"));
    assert_eq!(settings.server_command.as_deref(), Some("/usr/local/bin/lmbridge"));
    assert_eq!(settings.server_args, ["mcp", "--model", "qwen2.5-7b-instruct"]);
}

#[test]
#[serial]
fn empty_file_keeps_defaults() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = write_settings(dir.path(), "");

    let settings = BridgeSettings::load(Some(&path), &SettingsOverrides::default()).expect("load");

    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    assert_eq!(settings.model(), None);
    assert_eq!(settings.reachability_timeout, DEFAULT_REACHABILITY_TIMEOUT);
    assert_eq!(settings.completion_timeout, DEFAULT_COMPLETION_TIMEOUT);
    assert_eq!(settings.server_args, ["mcp"]);
}

#[test]
#[serial]
fn unknown_key_is_parse_error() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = write_settings(dir.path(), "base_uri = \"http://localhost:1234\"\n");

    let result = BridgeSettings::load(Some(&path), &SettingsOverrides::default());

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn zero_timeout_is_rejected() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = write_settings(dir.path(), "reachability_timeout_secs = 0\n");

    let result = BridgeSettings::load(Some(&path), &SettingsOverrides::default());

    assert!(matches!(result, Err(ConfigError::ZeroTimeout { .. })));
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
#[serial]
fn environment_beats_file() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = write_settings(dir.path(), FULL_FILE);
    set_env(ENV_BASE_URL, "http://10.0.0.7:1234");
    set_env(ENV_MODEL, "llama-3.2-3b-instruct");

    let settings = BridgeSettings::load(Some(&path), &SettingsOverrides::default()).expect("load");
    clear_env();

    assert_eq!(settings.base_url, "http://10.0.0.7:1234");
    assert_eq!(settings.model(), Some("llama-3.2-3b-instruct"));
}

#[test]
#[serial]
fn blank_environment_values_are_ignored() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = write_settings(dir.path(), FULL_FILE);
    set_env(ENV_MODEL, "   ");

    let settings = BridgeSettings::load(Some(&path), &SettingsOverrides::default()).expect("load");
    clear_env();

    assert_eq!(settings.model(), Some("qwen2.5-7b-instruct"));
}

#[test]
#[serial]
fn overrides_beat_environment() {
    clear_env();
    let dir = tempdir().expect("tempdir");
    let path = write_settings(dir.path(), FULL_FILE);
    set_env(ENV_BASE_URL, "http://10.0.0.7:1234");
    let overrides = SettingsOverrides {
        base_url: Some("http://127.0.0.1:8080".to_string()),
        completion_timeout: Some(Duration::from_secs(60)),
        launch_config_path: Some(PathBuf::from("/tmp/other/mcp.json")),
        ..SettingsOverrides::default()
    };

    let settings = BridgeSettings::load(Some(&path), &overrides).expect("load");
    clear_env();

    assert_eq!(settings.base_url, "http://127.0.0.1:8080");
    assert_eq!(settings.completion_timeout, Duration::from_secs(60));
    assert_eq!(settings.launch_config_path, PathBuf::from("/tmp/other/mcp.json"));
    assert_eq!(settings.model(), Some("qwen2.5-7b-instruct"));
}

#[test]
#[serial]
fn endpoint_uses_resolved_base_url() {
    clear_env();
    let overrides = SettingsOverrides {
        base_url: Some("http://127.0.0.1:1235/".to_string()),
        ..SettingsOverrides::default()
    };
    let dir = tempdir().expect("tempdir");
    let path = write_settings(dir.path(), "");

    let settings = BridgeSettings::load(Some(&path), &overrides).expect("load");

    assert_eq!(
        settings.endpoint().url("/v1/models"),
        "http://127.0.0.1:1235/v1/models"
    );
}
