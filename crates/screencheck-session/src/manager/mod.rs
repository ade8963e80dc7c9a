//! Capture session manager: start, stop, dispose, and observable state.

mod handle;
mod state;


use std::sync::Arc;

use screencheck_common::{
    CaptureError, EndReason, SessionError, SessionEvent, SessionId, SessionSnapshot,
    SessionStatus, StreamMetadata,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::classify::classify_failure;
use crate::metadata::extract_metadata;
use crate::provider::{self, CaptureFailure, CaptureProvider, CaptureStream};
use crate::types::SessionConfig;

pub use handle::StreamHandle;

use state::{release_stream, LiveSession, Shared};

// ---------------------------------------------------------------------------
// Session Manager
// ---------------------------------------------------------------------------

/// Owns at most one capture session and its lifecycle.
///
/// `start()` is the only suspension point. `stop()` and `dispose()` are
/// synchronous and release tracks before returning. Dropping the manager
/// disposes it.
pub struct SessionManager {
    config: SessionConfig,
    provider: Arc<dyn CaptureProvider>,
    shared: Arc<Shared>,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn CaptureProvider>, config: SessionConfig) -> Self {
        let shared = Arc::new(Shared::new(config.event_capacity));
        Self {
            config,
            provider,
            shared,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    /// Capture function present and the context is secure.
    pub fn is_supported(&self) -> bool {
        self.provider.capabilities().is_supported()
    }

    pub fn is_disposed(&self) -> bool {
        !self.shared.is_alive()
    }

    pub fn status(&self) -> SessionStatus {
        self.shared.lock().status
    }

    pub fn stream(&self) -> Option<StreamHandle> {
        self.shared
            .lock()
            .session
            .as_ref()
            .map(|s| StreamHandle::new(s.id.clone(), Arc::clone(&s.stream)))
    }

    pub fn metadata(&self) -> Option<StreamMetadata> {
        self.shared.lock().session.as_ref().and_then(|s| s.metadata)
    }

    pub fn error(&self) -> Option<SessionError> {
        self.shared.lock().error.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let is_supported = self.is_supported();
        let state = self.shared.lock();
        SessionSnapshot {
            status: state.status,
            metadata: state.session.as_ref().and_then(|s| s.metadata),
            error: state.error.clone(),
            has_stream: state.session.is_some(),
            is_supported,
        }
    }

    /// Requests a new capture session.
    ///
    /// Tears down whatever session exists first and supersedes any request
    /// still in flight. Failures never escape: they settle into a status
    /// and an [`error`](Self::error).
    pub async fn start(&self) {
        if !self.shared.is_alive() {
            debug!("start() after dispose ignored");
            return;
        }

        let capabilities = self.provider.capabilities();
        let (attempt, replaced) = {
            let mut state = self.shared.lock();
            if !self.shared.is_alive() {
                debug!("start() raced dispose, ignored");
                return;
            }
            let replaced = self.shared.detach(&mut state, EndReason::Retry);
            state.attempt += 1;
            state.error = None;

            match capabilities.check() {
                Ok(()) => {
                    self.shared.transition(&mut state, SessionStatus::Requesting);
                    (Some(state.attempt), replaced)
                }
                Err(e) => {
                    warn!(error = %e, "screen capture unavailable");
                    state.error = Some(match e {
                        CaptureError::InsecureContext => SessionError::insecure_context(),
                        CaptureError::Unsupported => SessionError::unsupported(),
                    });
                    self.shared.transition(&mut state, SessionStatus::Error);
                    (None, replaced)
                }
            }
        };

        if let Some(session) = replaced {
            release_stream(session.stream.as_ref());
        }
        let Some(attempt) = attempt else {
            return;
        };

        let constraints = self.config.constraints();
        debug!(
            attempt,
            frame_rate_ideal = constraints.video.frame_rate_ideal,
            "requesting screen capture"
        );
        let result = self.provider.acquire(&constraints).await;
        self.settle(attempt, result);
    }

    /// Ends the current session. Safe to call in any status, any number of
    /// times; always leaves the manager `stopped` with no error.
    pub fn stop(&self) {
        self.shared.end_session(None, EndReason::Caller);
    }

    /// Releases everything and freezes observable state. Later settlements
    /// are released without touching state; later `start()` calls do
    /// nothing.
    pub fn dispose(&self) {
        if !self.shared.mark_disposed() {
            return;
        }
        self.shared.end_session(None, EndReason::Disposed);
        debug!("session manager disposed");
    }

    fn settle(&self, attempt: u64, result: provider::Result<Arc<dyn CaptureStream>>) {
        match result {
            Ok(stream) => self.adopt(attempt, stream),
            Err(failure) => self.reject(attempt, failure),
        }
    }

    fn adopt(&self, attempt: u64, stream: Arc<dyn CaptureStream>) {
        if !self.shared.is_alive() {
            debug!(stream_id = %stream.id(), "stream settled after dispose, releasing");
            release_stream(stream.as_ref());
            return;
        }

        let session_id = SessionId::new();
        let first_video = stream.video_tracks().into_iter().next();
        let metadata = first_video.as_ref().map(|t| extract_metadata(&t.settings()));

        // Registered before the session is visible so an early platform end
        // cannot slip past; it is a no-op until the id below is live.
        if let Some(track) = &first_video {
            let weak = Arc::downgrade(&self.shared);
            let expected = session_id.clone();
            track.set_on_ended(Arc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.end_session(Some(&expected), EndReason::Platform);
                }
            }));
        }

        let adopted = {
            let mut state = self.shared.lock();
            if state.attempt != attempt || !self.shared.is_alive() {
                false
            } else {
                state.session = Some(LiveSession {
                    id: session_id.clone(),
                    stream: Arc::clone(&stream),
                    metadata,
                });
                state.error = None;
                self.shared.transition(&mut state, SessionStatus::Active);
                self.shared.events.publish(SessionEvent::StreamAcquired {
                    session_id: session_id.clone(),
                    metadata,
                });
                true
            }
        };

        if !adopted {
            debug!(attempt, "superseded settlement released");
            release_stream(stream.as_ref());
            return;
        }

        match &metadata {
            Some(m) => info!(
                session = %session_id.short(),
                surface = %m.display_surface,
                width = m.width,
                height = m.height,
                frame_rate = m.frame_rate,
                "screen capture active"
            ),
            None => info!(session = %session_id.short(), "screen capture active without video track"),
        }

        // The platform may have ended the track before the callback existed.
        if let Some(track) = first_video {
            if !track.is_live() {
                self.shared.end_session(Some(&session_id), EndReason::Platform);
            }
        }
    }

    fn reject(&self, attempt: u64, failure: CaptureFailure) {
        if !self.shared.is_alive() {
            debug!(%failure, "rejection settled after dispose, ignoring");
            return;
        }

        let error = classify_failure(&failure, &self.config.classification);
        let mut state = self.shared.lock();
        if state.attempt != attempt || !self.shared.is_alive() {
            debug!(attempt, %failure, "superseded rejection ignored");
            return;
        }

        let status = error.status();
        if status == SessionStatus::Error {
            warn!(%failure, "screen capture failed");
        } else {
            info!(%status, "screen capture not granted");
        }
        state.error = Some(error);
        self.shared.transition(&mut state, status);
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.dispose();
    }
}
