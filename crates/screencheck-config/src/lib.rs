//! screencheck configuration system.
//!
//! TOML-based configuration with validation. All sections use defaults so
//! partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use screencheck_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    CaptureConfig, ClassificationConfig, LogLevel, LoggingConfig, ScreenCheckConfig,
    CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use screencheck_common::ConfigError;

/// Load and validate config from the platform default path, creating a
/// default file if none exists.
pub fn load_config() -> Result<ScreenCheckConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path. A missing file is an
/// error here; nothing is created.
pub fn load_config_from(path: &Path) -> Result<ScreenCheckConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ScreenCheckConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
