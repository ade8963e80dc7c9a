//! Core TOML config loading: read from path or platform default.

use std::io::ErrorKind;
use std::path::Path;

use screencheck_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::ScreenCheckConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Missing fields take their defaults. Validation problems are logged and
/// the parsed config is returned as-is; callers that need a guarantee run
/// [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<ScreenCheckConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    let config: ScreenCheckConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/screencheck/config.toml`
/// On macOS: `~/Library/Application Support/screencheck/config.toml`
///
/// If the file does not exist, writes the commented default and returns
/// defaults.
pub fn load_default() -> Result<ScreenCheckConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(ScreenCheckConfig::default())
        }
        Err(e) => Err(e),
    }
}
