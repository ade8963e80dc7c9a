//! Screen-capture session management.
//!
//! Drives the request/grant/deny/cancel/end lifecycle of a single capture
//! session against a pluggable [`CaptureProvider`], classifies failures,
//! extracts stream metadata, and releases the stream on every exit path.

pub mod classify;
pub mod manager;
pub mod metadata;
pub mod provider;
pub mod types;

pub use classify::{classify_failure, ClassificationPolicy};
pub use manager::{SessionManager, StreamHandle};
pub use metadata::{extract_metadata, map_display_surface};
pub use provider::simulated::{SimulatedOutcome, SimulatedProvider};
pub use provider::{
    Capabilities, CaptureConstraints, CaptureFailure, CaptureProvider, CaptureStream,
    CaptureTrack, FailureCategory, TrackKind, TrackSettings,
};
pub use types::SessionConfig;
