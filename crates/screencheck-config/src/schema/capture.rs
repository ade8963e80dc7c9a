//! Capture request configuration.

use serde::{Deserialize, Serialize};

/// Options sent with every capture request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Preferred frame rate (valid range: 1-120).
    pub frame_rate_ideal: u32,
    /// Size of the session event channel (valid range: 1-4096).
    pub event_capacity: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_rate_ideal: 30,
            event_capacity: 64,
        }
    }
}
