//! Observable session state shared between the session manager and
//! whatever presents it.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of the capture session. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Requesting,
    Active,
    Cancelled,
    Denied,
    Error,
    Stopped,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Denied => "denied",
            Self::Error => "error",
            Self::Stopped => "stopped",
        }
    }

    /// Terminal until the user retries with a fresh `start()`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Denied | Self::Error | Self::Stopped
        )
    }

    /// Every terminal status offers an explicit retry.
    pub fn can_retry(&self) -> bool {
        self.is_terminal()
    }

    /// Statuses in which a stream handle may exist.
    pub fn may_hold_stream(&self) -> bool {
        matches!(self, Self::Requesting | Self::Active)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stream metadata
// ---------------------------------------------------------------------------

/// Kind of content being captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySurface {
    Monitor,
    Window,
    Browser,
    #[default]
    Unknown,
}

impl DisplaySurface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monitor => "monitor",
            Self::Window => "window",
            Self::Browser => "browser",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monitor => "Entire Screen",
            Self::Window => "Application Window",
            Self::Browser => "Browser Tab",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DisplaySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the negotiated stream properties, taken once per acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamMetadata {
    pub display_surface: DisplaySurface,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

impl StreamMetadata {
    /// `"1920 × 1080"`, or `"Unknown"` when either dimension was unreported.
    pub fn resolution_label(&self) -> String {
        if self.width == 0 || self.height == 0 {
            return "Unknown".into();
        }
        format!("{} × {}", self.width, self.height)
    }

    /// Marketing tier for the vertical resolution.
    pub fn quality_tier(&self) -> Option<&'static str> {
        match self.height {
            0 => None,
            h if h >= 2160 => Some("4K"),
            h if h >= 1440 => Some("2K"),
            h if h >= 1080 => Some("FHD"),
            h if h >= 720 => Some("HD"),
            _ => Some("SD"),
        }
    }

    pub fn frame_rate_label(&self) -> String {
        if self.frame_rate <= 0.0 || !self.frame_rate.is_finite() {
            return "Unknown".into();
        }
        format!("{} FPS", self.frame_rate.round())
    }
}

// ---------------------------------------------------------------------------
// Errors surfaced to presentation
// ---------------------------------------------------------------------------

pub const CANCELLED_MESSAGE: &str = "Screen sharing was cancelled. You can try again when ready.";
pub const DENIED_MESSAGE: &str =
    "Screen sharing permission was denied. Please allow access to share your screen.";
pub const UNKNOWN_MESSAGE: &str = "An unexpected error occurred while starting screen share.";
pub const UNSUPPORTED_MESSAGE: &str = "Screen sharing is not supported in this environment.";
pub const INSECURE_CONTEXT_MESSAGE: &str =
    "Screen sharing requires a secure context (HTTPS or localhost).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionErrorKind {
    Cancelled,
    Denied,
    Unknown,
}

/// Structured failure shown alongside the `cancelled`, `denied` and `error`
/// statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn cancelled() -> Self {
        Self {
            kind: SessionErrorKind::Cancelled,
            message: CANCELLED_MESSAGE.into(),
        }
    }

    pub fn denied() -> Self {
        Self {
            kind: SessionErrorKind::Denied,
            message: DENIED_MESSAGE.into(),
        }
    }

    /// Unknown failure, keeping the provider's message when it has one.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: SessionErrorKind::Unknown,
            message: if message.trim().is_empty() {
                UNKNOWN_MESSAGE.into()
            } else {
                message
            },
        }
    }

    pub fn unsupported() -> Self {
        Self::unknown(UNSUPPORTED_MESSAGE)
    }

    pub fn insecure_context() -> Self {
        Self::unknown(INSECURE_CONTEXT_MESSAGE)
    }

    /// Status this error settles a request into.
    pub fn status(&self) -> SessionStatus {
        match self.kind {
            SessionErrorKind::Cancelled => SessionStatus::Cancelled,
            SessionErrorKind::Denied => SessionStatus::Denied,
            SessionErrorKind::Unknown => SessionStatus::Error,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ---------------------------------------------------------------------------
// Session end / snapshot
// ---------------------------------------------------------------------------

/// Which path tore a live session down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// `stop()` from the caller.
    Caller,
    /// The platform ended the track (e.g. "Stop sharing" in browser chrome).
    Platform,
    /// A new `start()` replaced the session.
    Retry,
    /// The manager was disposed.
    Disposed,
}

/// Read-only view of the manager for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub metadata: Option<StreamMetadata>,
    pub error: Option<SessionError>,
    pub has_stream: bool,
    pub is_supported: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(width: u32, height: u32, frame_rate: f64) -> StreamMetadata {
        StreamMetadata {
            display_surface: DisplaySurface::Monitor,
            width,
            height,
            frame_rate,
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&SessionStatus::Requesting).unwrap();
        assert_eq!(json, "\"requesting\"");
        assert_eq!(SessionStatus::default(), SessionStatus::Idle);
    }

    #[test]
    fn terminal_statuses_offer_retry() {
        for status in [
            SessionStatus::Cancelled,
            SessionStatus::Denied,
            SessionStatus::Error,
            SessionStatus::Stopped,
        ] {
            assert!(status.is_terminal(), "{status}");
            assert!(status.can_retry(), "{status}");
            assert!(!status.may_hold_stream(), "{status}");
        }
        assert!(!SessionStatus::Idle.is_terminal());
        assert!(!SessionStatus::Active.can_retry());
        assert!(SessionStatus::Active.may_hold_stream());
    }

    #[test]
    fn resolution_label_needs_both_dimensions() {
        assert_eq!(meta(1920, 1080, 30.0).resolution_label(), "1920 × 1080");
        assert_eq!(meta(0, 1080, 30.0).resolution_label(), "Unknown");
        assert_eq!(meta(1920, 0, 30.0).resolution_label(), "Unknown");
    }

    #[test]
    fn quality_tiers() {
        assert_eq!(meta(3840, 2160, 0.0).quality_tier(), Some("4K"));
        assert_eq!(meta(2560, 1440, 0.0).quality_tier(), Some("2K"));
        assert_eq!(meta(1920, 1080, 0.0).quality_tier(), Some("FHD"));
        assert_eq!(meta(1280, 720, 0.0).quality_tier(), Some("HD"));
        assert_eq!(meta(640, 480, 0.0).quality_tier(), Some("SD"));
        assert_eq!(meta(640, 0, 0.0).quality_tier(), None);
    }

    #[test]
    fn frame_rate_label_rounds() {
        assert_eq!(meta(1, 1, 29.97).frame_rate_label(), "30 FPS");
        assert_eq!(meta(1, 1, 0.0).frame_rate_label(), "Unknown");
    }

    #[test]
    fn unknown_error_falls_back_on_blank_message() {
        let err = SessionError::unknown("   ");
        assert_eq!(err.message, UNKNOWN_MESSAGE);
        let err = SessionError::unknown("Could not start video source");
        assert_eq!(err.message, "Could not start video source");
        assert_eq!(err.status(), SessionStatus::Error);
    }

    #[test]
    fn error_kinds_map_to_statuses() {
        assert_eq!(SessionError::cancelled().status(), SessionStatus::Cancelled);
        assert_eq!(SessionError::denied().status(), SessionStatus::Denied);
        assert_eq!(SessionError::unsupported().kind, SessionErrorKind::Unknown);
        assert_eq!(
            SessionError::insecure_context().status(),
            SessionStatus::Error
        );
    }

    #[test]
    fn snapshot_serializes() {
        let snap = SessionSnapshot {
            status: SessionStatus::Active,
            metadata: Some(meta(1920, 1080, 30.0)),
            error: None,
            has_stream: true,
            is_supported: true,
        };
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"status\":\"active\""));
        assert!(json.contains("\"display_surface\":\"monitor\""));
        assert!(json.contains("\"error\":null"));
    }
}
