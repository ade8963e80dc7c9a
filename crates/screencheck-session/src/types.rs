//! Configuration for the session manager.

use crate::classify::ClassificationPolicy;
use crate::provider::{CaptureConstraints, DEFAULT_FRAME_RATE_IDEAL};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Frame rate hint sent with every request.
    pub frame_rate_ideal: u32,
    pub classification: ClassificationPolicy,
    /// Buffer size of the event broadcast channel.
    pub event_capacity: usize,
}

impl SessionConfig {
    /// Video only; audio capture is never requested.
    pub fn constraints(&self) -> CaptureConstraints {
        CaptureConstraints::video_only(self.frame_rate_ideal)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_rate_ideal: DEFAULT_FRAME_RATE_IDEAL,
            classification: ClassificationPolicy::default(),
            event_capacity: 64,
        }
    }
}
