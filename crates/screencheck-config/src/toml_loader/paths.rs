//! Where the config file lives, and seeding it on first run.

use std::path::{Path, PathBuf};

use screencheck_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "screencheck";
const FILE_NAME: &str = "config.toml";

/// `<os config dir>/screencheck/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no user config directory on this platform".into()))
}

/// Seeds `path` with the commented template. Overwrites an existing file.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_failure = |what: &str, at: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("cannot {what} {}: {e}", at.display()))
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_failure("create", dir, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_failure("write", path, e))?;

    info!(path = %path.display(), "seeded default config");
    Ok(())
}
