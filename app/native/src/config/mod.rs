//! Configuration module for Masonry.
//!
//! This module provides configuration types and loading functionality.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//! A missing file is not an error: the engine runs on defaults.

pub mod template;
pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{
    AnimationConfig, BlurConfig, BreakpointConfig, ConfigError, EasingType, EntryDirection,
    HoverConfig, LayoutConfig, MasonryConfig, RevealConfig, config_paths,
    load_config as load_config_default, load_config_from_path, parse_config,
};

/// Global configuration instance, loaded once at startup.
static CONFIG: OnceLock<MasonryConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `get_config()` to take effect.
///
/// # Returns
///
/// `true` if the path was set successfully, `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Returns the custom configuration path, if one was set.
pub fn custom_config_path() -> Option<&'static PathBuf> { CUSTOM_CONFIG_PATH.get() }

/// Loads the configuration from disk, falling back to defaults.
fn load_or_default() -> MasonryConfig {
    let result = CUSTOM_CONFIG_PATH
        .get()
        .map_or_else(load_config_default, |path| load_config_from_path(path));

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "masonry: loaded configuration");
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("masonry: no configuration file, using defaults");
            MasonryConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "masonry: failed to load configuration, using defaults");
            MasonryConfig::default()
        }
    }
}

/// Returns the global configuration instance, loading it on first use.
///
/// Later calls return the same instance.
pub fn get_config() -> &'static MasonryConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = ConfigError::NotFound;
        let msg = err.to_string();
        assert!(msg.contains("No configuration file found"));
    }

    #[test]
    fn test_invalid_error_names_field() {
        let err = ConfigError::Invalid("reveal.triggerRatio out of range".to_string());
        assert!(err.to_string().contains("reveal.triggerRatio"));
    }
}
