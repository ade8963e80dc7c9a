//! Scripted capture provider.
//!
//! Stands in for a real display-media facility in tests and in the
//! `screencheck` dry-run binary. Outcomes are queued up front; every
//! stream handed out is remembered so callers can check that no track was
//! left running.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use screencheck_common::new_id;
use tokio::sync::Notify;
use tracing::debug;

use super::{
    Capabilities, CaptureConstraints, CaptureFailure, CaptureProvider, CaptureStream,
    CaptureTrack, EndedCallback, FailureCategory, Result, TrackKind, TrackSettings,
};

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

pub struct SimulatedTrack {
    id: String,
    kind: TrackKind,
    settings: TrackSettings,
    live: AtomicBool,
    stop_calls: AtomicUsize,
    on_ended: Mutex<Option<EndedCallback>>,
}

impl SimulatedTrack {
    pub fn new(kind: TrackKind, settings: TrackSettings) -> Self {
        Self {
            id: new_id(),
            kind,
            settings,
            live: AtomicBool::new(true),
            stop_calls: AtomicUsize::new(0),
            on_ended: Mutex::new(None),
        }
    }

    pub fn video(settings: TrackSettings) -> Self {
        Self::new(TrackKind::Video, settings)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn has_ended_handler(&self) -> bool {
        self.on_ended
            .lock()
            .map(|cb| cb.is_some())
            .unwrap_or(false)
    }

    /// Ends the track the way the platform would: marks it dead and fires
    /// the registered callback once. Returns whether a callback ran.
    pub fn end_from_platform(&self) -> bool {
        if !self.live.swap(false, Ordering::SeqCst) {
            return false;
        }
        // Clone out so the callback runs without our lock held.
        let callback = self.on_ended.lock().ok().and_then(|cb| cb.clone());
        match callback {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

impl CaptureTrack for SimulatedTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn settings(&self) -> TrackSettings {
        self.settings.clone()
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn stop(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.live.store(false, Ordering::SeqCst);
    }

    fn set_on_ended(&self, callback: EndedCallback) {
        if let Ok(mut slot) = self.on_ended.lock() {
            *slot = Some(callback);
        }
    }

    fn clear_on_ended(&self) {
        if let Ok(mut slot) = self.on_ended.lock() {
            *slot = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Stream
// ---------------------------------------------------------------------------

pub struct SimulatedStream {
    id: String,
    tracks: Vec<Arc<SimulatedTrack>>,
}

impl SimulatedStream {
    pub fn new(tracks: Vec<Arc<SimulatedTrack>>) -> Self {
        Self {
            id: new_id(),
            tracks,
        }
    }

    pub fn simulated_tracks(&self) -> &[Arc<SimulatedTrack>] {
        &self.tracks
    }

    pub fn live_track_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_live()).count()
    }
}

impl CaptureStream for SimulatedStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn tracks(&self) -> Vec<Arc<dyn CaptureTrack>> {
        self.tracks
            .iter()
            .map(|t| Arc::clone(t) as Arc<dyn CaptureTrack>)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// What the next `acquire` call resolves to.
#[derive(Debug, Clone)]
pub enum SimulatedOutcome {
    /// Resolve with a stream carrying one track per entry.
    Grant(Vec<(TrackKind, TrackSettings)>),
    Fail(CaptureFailure),
}

impl SimulatedOutcome {
    /// A single video track with the given surface and geometry.
    pub fn screen(surface: &str, width: u32, height: u32, frame_rate: f64) -> Self {
        Self::Grant(vec![(
            TrackKind::Video,
            TrackSettings {
                display_surface: Some(surface.to_string()),
                width: Some(width),
                height: Some(height),
                frame_rate: Some(frame_rate),
            },
        )])
    }
}

pub struct SimulatedProvider {
    capabilities: Capabilities,
    outcomes: Mutex<VecDeque<SimulatedOutcome>>,
    latency: Option<Duration>,
    gate: Option<Arc<Notify>>,
    requests: AtomicUsize,
    last_constraints: Mutex<Option<CaptureConstraints>>,
    issued: Mutex<Vec<Arc<SimulatedStream>>>,
}

impl SimulatedProvider {
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::supported())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            outcomes: Mutex::new(VecDeque::new()),
            latency: None,
            gate: None,
            requests: AtomicUsize::new(0),
            last_constraints: Mutex::new(None),
            issued: Mutex::new(Vec::new()),
        }
    }

    /// Platform without any capture-acquisition function.
    pub fn unsupported() -> Self {
        Self::with_capabilities(Capabilities {
            api_available: false,
            secure_context: true,
        })
    }

    /// Capture function present but the context is not secure.
    pub fn insecure() -> Self {
        Self::with_capabilities(Capabilities {
            api_available: true,
            secure_context: false,
        })
    }

    pub fn with_outcome(self, outcome: SimulatedOutcome) -> Self {
        if let Ok(mut q) = self.outcomes.lock() {
            q.push_back(outcome);
        }
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every request waits for one `notify_one()` on the gate before settling.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn push_outcome(&self, outcome: SimulatedOutcome) {
        if let Ok(mut q) = self.outcomes.lock() {
            q.push_back(outcome);
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_constraints(&self) -> Option<CaptureConstraints> {
        self.last_constraints.lock().ok().and_then(|c| *c)
    }

    /// Streams handed out so far, oldest first.
    pub fn issued_streams(&self) -> Vec<Arc<SimulatedStream>> {
        self.issued.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Live tracks across every stream ever handed out.
    pub fn live_track_count(&self) -> usize {
        self.issued_streams()
            .iter()
            .map(|s| s.live_track_count())
            .sum()
    }

    /// Ends the video tracks of the most recent stream from the platform
    /// side. Returns whether any ended callback ran.
    pub fn end_from_platform(&self) -> bool {
        let Some(stream) = self.issued_streams().pop() else {
            return false;
        };
        let mut fired = false;
        for track in stream.simulated_tracks() {
            if track.kind() == TrackKind::Video {
                fired |= track.end_from_platform();
            }
        }
        fired
    }

    fn next_outcome(&self) -> SimulatedOutcome {
        self.outcomes
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .unwrap_or_else(|| {
                SimulatedOutcome::Fail(CaptureFailure::new(
                    FailureCategory::InvalidState,
                    "no scripted outcome left",
                ))
            })
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureProvider for SimulatedProvider {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    async fn acquire(&self, constraints: &CaptureConstraints) -> Result<Arc<dyn CaptureStream>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_constraints.lock() {
            *last = Some(*constraints);
        }

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.next_outcome() {
            SimulatedOutcome::Grant(specs) => {
                let tracks = specs
                    .into_iter()
                    .map(|(kind, settings)| Arc::new(SimulatedTrack::new(kind, settings)))
                    .collect();
                let stream = Arc::new(SimulatedStream::new(tracks));
                if let Ok(mut issued) = self.issued.lock() {
                    issued.push(Arc::clone(&stream));
                }
                debug!(stream_id = %stream.id(), "simulated stream granted");
                Ok(stream as Arc<dyn CaptureStream>)
            }
            SimulatedOutcome::Fail(failure) => {
                debug!(%failure, "simulated acquisition rejected");
                Err(failure)
            }
        }
    }
}
