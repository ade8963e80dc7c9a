//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod capture;
mod classification;
mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::ScreenCheckConfig;
use screencheck_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ScreenCheckConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    capture::validate_capture(&mut errors, config);
    classification::validate_classification(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
