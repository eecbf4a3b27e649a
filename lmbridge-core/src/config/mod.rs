pub mod error;
pub mod loader;
pub mod settings;

pub use error::ConfigError;
pub use loader::ensure_env_loaded;
pub use settings::{BridgeSettings, SettingsOverrides};
