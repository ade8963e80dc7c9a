//! The platform's display-media facility, seen from the session manager.
//!
//! A provider answers a capability probe and hands out streams. Streams
//! carry tracks; each track reports its negotiated settings, can be
//! stopped, and notifies a single registered callback when the platform
//! ends it on its own (the user clicking "Stop sharing" in browser chrome,
//! a window closing, a monitor unplugging).

pub mod simulated;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use screencheck_common::CaptureError;

pub type Result<T> = std::result::Result<T, CaptureFailure>;

// ---------------------------------------------------------------------------
// Capability probe
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// The platform exposes a capture-acquisition function.
    pub api_available: bool,
    /// The execution context is secure (HTTPS or localhost).
    pub secure_context: bool,
}

impl Capabilities {
    pub fn supported() -> Self {
        Self {
            api_available: true,
            secure_context: true,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.api_available && self.secure_context
    }

    pub fn check(&self) -> std::result::Result<(), CaptureError> {
        if !self.api_available {
            return Err(CaptureError::Unsupported);
        }
        if !self.secure_context {
            return Err(CaptureError::InsecureContext);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request constraints
// ---------------------------------------------------------------------------

pub const DEFAULT_FRAME_RATE_IDEAL: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    /// Target frame rate hint; the platform may negotiate something else.
    pub frame_rate_ideal: u32,
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self {
            frame_rate_ideal: DEFAULT_FRAME_RATE_IDEAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub video: VideoConstraints,
    pub audio: bool,
}

impl CaptureConstraints {
    pub fn video_only(frame_rate_ideal: u32) -> Self {
        Self {
            video: VideoConstraints { frame_rate_ideal },
            audio: false,
        }
    }
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self::video_only(DEFAULT_FRAME_RATE_IDEAL)
    }
}

// ---------------------------------------------------------------------------
// Streams and tracks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

/// Settings as the platform reports them. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSettings {
    pub display_surface: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<f64>,
}

/// Fired at most once, when the platform ends a track.
pub type EndedCallback = Arc<dyn Fn() + Send + Sync>;

pub trait CaptureTrack: Send + Sync {
    fn id(&self) -> &str;
    fn kind(&self) -> TrackKind;
    fn settings(&self) -> TrackSettings;
    fn is_live(&self) -> bool;
    /// Stops the track. Must not invoke the ended callback.
    fn stop(&self);
    /// Replaces any previously registered ended callback.
    fn set_on_ended(&self, callback: EndedCallback);
    fn clear_on_ended(&self);
}

pub trait CaptureStream: Send + Sync {
    fn id(&self) -> &str;
    fn tracks(&self) -> Vec<Arc<dyn CaptureTrack>>;

    fn video_tracks(&self) -> Vec<Arc<dyn CaptureTrack>> {
        self.tracks()
            .into_iter()
            .filter(|t| t.kind() == TrackKind::Video)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// Category of a rejected acquisition, as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCategory {
    /// The user dismissed the picker.
    Abort,
    /// The user or a policy refused permission.
    PermissionDenied,
    NotFound,
    NotReadable,
    Overconstrained,
    InvalidState,
    Other(String),
}

impl FailureCategory {
    /// Maps a platform error name (`"NotAllowedError"`, ...) to a category.
    /// Matching ignores case.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "aborterror" => Self::Abort,
            "notallowederror" | "permissiondeniederror" => Self::PermissionDenied,
            "notfounderror" => Self::NotFound,
            "notreadableerror" => Self::NotReadable,
            "overconstrainederror" => Self::Overconstrained,
            "invalidstateerror" => Self::InvalidState,
            _ => Self::Other(name.to_string()),
        }
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort)
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => f.write_str("AbortError"),
            Self::PermissionDenied => f.write_str("NotAllowedError"),
            Self::NotFound => f.write_str("NotFoundError"),
            Self::NotReadable => f.write_str("NotReadableError"),
            Self::Overconstrained => f.write_str("OverconstrainedError"),
            Self::InvalidState => f.write_str("InvalidStateError"),
            Self::Other(name) if name.is_empty() => f.write_str("Error"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A rejected acquisition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{category}: {message}")]
pub struct CaptureFailure {
    pub category: FailureCategory,
    pub message: String,
}

impl CaptureFailure {
    pub fn new(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Builds a failure from a platform error name and message.
    pub fn named(name: &str, message: impl Into<String>) -> Self {
        Self::new(FailureCategory::from_name(name), message)
    }

    pub fn abort(message: impl Into<String>) -> Self {
        Self::new(FailureCategory::Abort, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(FailureCategory::PermissionDenied, message)
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CaptureProvider: Send + Sync {
    fn capabilities(&self) -> Capabilities;

    /// Requests a stream. Cannot be aborted once issued.
    async fn acquire(&self, constraints: &CaptureConstraints) -> Result<Arc<dyn CaptureStream>>;
}
