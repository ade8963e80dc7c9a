//! Configuration schema types for screencheck.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the session manager uses.

mod capture;
mod classification;
mod logging;

pub use capture::*;
pub use classification::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenCheckConfig {
    pub capture: CaptureConfig,
    pub classification: ClassificationConfig,
    pub logging: LoggingConfig,
}
