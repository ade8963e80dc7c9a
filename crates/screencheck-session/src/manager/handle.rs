use std::fmt;
use std::sync::Arc;

use screencheck_common::SessionId;

use crate::provider::{CaptureStream, TrackSettings};

/// Read-only view of the live stream, for attaching to a preview sink.
///
/// Tracks can only be stopped through the manager.
#[derive(Clone)]
pub struct StreamHandle {
    session_id: SessionId,
    stream: Arc<dyn CaptureStream>,
}

impl StreamHandle {
    pub(super) fn new(session_id: SessionId, stream: Arc<dyn CaptureStream>) -> Self {
        Self { session_id, stream }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn stream_id(&self) -> &str {
        self.stream.id()
    }

    pub fn track_ids(&self) -> Vec<String> {
        self.stream
            .tracks()
            .iter()
            .map(|t| t.id().to_string())
            .collect()
    }

    /// Settings of the first video track, as currently reported.
    pub fn video_settings(&self) -> Option<TrackSettings> {
        self.stream.video_tracks().first().map(|t| t.settings())
    }

    pub fn is_live(&self) -> bool {
        self.stream.tracks().iter().any(|t| t.is_live())
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle")
            .field("session_id", &self.session_id)
            .field("stream_id", &self.stream.id())
            .finish()
    }
}
