//! State shared between the manager and the ended callbacks it registers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use screencheck_common::{
    EndReason, EventBus, SessionError, SessionEvent, SessionId, SessionStatus, StreamMetadata,
};
use tracing::{debug, info};

use crate::provider::CaptureStream;

/// The stream currently owned by the manager.
pub(super) struct LiveSession {
    pub id: SessionId,
    pub stream: Arc<dyn CaptureStream>,
    pub metadata: Option<StreamMetadata>,
}

#[derive(Default)]
pub(super) struct SessionState {
    pub status: SessionStatus,
    /// Some only while `status` is `Active`.
    pub session: Option<LiveSession>,
    pub error: Option<SessionError>,
    /// Bumped by every `start()` and `stop()`; a settlement carrying an
    /// older value is stale.
    pub attempt: u64,
}

pub(super) struct Shared {
    state: Mutex<SessionState>,
    alive: AtomicBool,
    pub events: EventBus,
}

impl Shared {
    pub fn new(event_capacity: usize) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            alive: AtomicBool::new(true),
            events: EventBus::new(event_capacity.max(1)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Clears the liveness flag. Returns `false` if it was already clear.
    pub fn mark_disposed(&self) -> bool {
        self.alive.swap(false, Ordering::SeqCst)
    }

    pub fn transition(&self, state: &mut SessionState, to: SessionStatus) {
        let from = state.status;
        if from == to {
            return;
        }
        state.status = to;
        debug!(%from, %to, "session status changed");
        self.events.publish(SessionEvent::StatusChanged { from, to });
    }

    /// Takes the live session out of `state`. The caller must hand it to
    /// [`release_stream`] once the lock is dropped.
    pub fn detach(&self, state: &mut SessionState, reason: EndReason) -> Option<LiveSession> {
        let session = state.session.take()?;
        info!(session = %session.id.short(), ?reason, "capture session ended");
        self.events.publish(SessionEvent::SessionEnded {
            session_id: session.id.clone(),
            reason,
        });
        Some(session)
    }

    /// The one handler every "end session" producer goes through.
    ///
    /// With `expected` set (the platform's ended callback) it acts only if
    /// that session is still the live one, so a callback racing `stop()`
    /// cannot stop a session twice or touch a newer one.
    pub fn end_session(&self, expected: Option<&SessionId>, reason: EndReason) {
        let detached = {
            let mut state = self.lock();

            if let Some(expected) = expected {
                if state.session.as_ref().map(|s| &s.id) != Some(expected) {
                    debug!(session = %expected.short(), ?reason, "end for stale session ignored");
                    return;
                }
            }

            let detached = self.detach(&mut state, reason);
            let alive = self.is_alive();
            match reason {
                EndReason::Caller => {
                    // Anything still in flight is no longer wanted.
                    state.attempt += 1;
                    if alive {
                        state.error = None;
                        self.transition(&mut state, SessionStatus::Stopped);
                    }
                }
                EndReason::Platform => {
                    if alive {
                        self.transition(&mut state, SessionStatus::Stopped);
                    }
                }
                EndReason::Retry | EndReason::Disposed => {}
            }
            detached
        };

        if let Some(session) = detached {
            release_stream(session.stream.as_ref());
        }
    }
}

/// Detaches ended handlers and stops every track. Must be called without
/// the state lock held: a provider may run callbacks from inside `stop()`.
pub(super) fn release_stream(stream: &dyn CaptureStream) {
    for track in stream.tracks() {
        track.clear_on_ended();
        track.stop();
    }
    debug!(stream_id = %stream.id(), "stream released");
}
