//! One scripted capture session, start to finish.

use std::sync::Arc;
use std::time::Duration;

use screencheck_common::{SessionEvent, SessionSnapshot, SessionStatus};
use screencheck_config::ScreenCheckConfig;
use screencheck_session::{
    CaptureFailure, ClassificationPolicy, SessionConfig, SessionManager, SimulatedOutcome,
    SimulatedProvider,
};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::info;

use crate::cli::{Args, Outcome};

/// What the session manager reported over one run.
#[derive(Debug, Serialize)]
pub struct Report {
    /// State once `start()` settled.
    pub started: SessionSnapshot,
    /// State after the session was ended. Equal to `started` when the
    /// request never went active.
    pub finished: SessionSnapshot,
    pub events: Vec<SessionEvent>,
}

pub fn session_config(config: &ScreenCheckConfig) -> SessionConfig {
    SessionConfig {
        frame_rate_ideal: config.capture.frame_rate_ideal,
        classification: ClassificationPolicy {
            permission_cancel_keywords: config.classification.permission_cancel_keywords.clone(),
        },
        event_capacity: config.capture.event_capacity as usize,
    }
}

pub fn build_provider(args: &Args) -> SimulatedProvider {
    match args.outcome {
        Outcome::Unsupported => SimulatedProvider::unsupported(),
        Outcome::Insecure => SimulatedProvider::insecure(),
        Outcome::Grant => SimulatedProvider::new().with_outcome(SimulatedOutcome::screen(
            &args.surface,
            args.width,
            args.height,
            args.fps,
        )),
        Outcome::Cancel => SimulatedProvider::new().with_outcome(SimulatedOutcome::Fail(
            CaptureFailure::abort("The user aborted a request."),
        )),
        Outcome::Deny => SimulatedProvider::new().with_outcome(SimulatedOutcome::Fail(
            CaptureFailure::permission_denied("Permission denied"),
        )),
        Outcome::Fail => SimulatedProvider::new().with_outcome(SimulatedOutcome::Fail(
            CaptureFailure::named("NotReadableError", "Could not start video source"),
        )),
    }
}

pub async fn run(args: &Args, config: &ScreenCheckConfig) -> Report {
    let provider = Arc::new(build_provider(args));
    let manager = SessionManager::new(provider.clone(), session_config(config));
    let mut events = manager.subscribe();

    manager.start().await;
    let started = manager.snapshot();
    info!(status = %started.status, "capture request settled");

    if started.status == SessionStatus::Active {
        if args.hold_ms > 0 {
            tokio::time::sleep(Duration::from_millis(args.hold_ms)).await;
        }
        if args.platform_end {
            provider.end_from_platform();
        } else {
            manager.stop();
        }
    }
    let finished = manager.snapshot();
    drop(manager);

    Report {
        started,
        finished,
        events: drain(&mut events),
    }
}

fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                tracing::warn!("dropped {n} session events");
            }
            Err(_) => break,
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use screencheck_common::{DisplaySurface, EndReason, SessionErrorKind};

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["screencheck"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[tokio::test]
    async fn grant_then_stop() {
        let report = run(&args(&[]), &ScreenCheckConfig::default()).await;

        assert_eq!(report.started.status, SessionStatus::Active);
        let meta = report.started.metadata.unwrap();
        assert_eq!(meta.display_surface, DisplaySurface::Monitor);
        assert_eq!((meta.width, meta.height), (1920, 1080));

        assert_eq!(report.finished.status, SessionStatus::Stopped);
        assert!(!report.finished.has_stream);
        assert!(report.events.iter().any(|e| matches!(
            e,
            SessionEvent::SessionEnded {
                reason: EndReason::Caller,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn grant_then_platform_end() {
        let report = run(
            &args(&["--platform-end", "--surface", "window"]),
            &ScreenCheckConfig::default(),
        )
        .await;

        assert_eq!(
            report.started.metadata.unwrap().display_surface,
            DisplaySurface::Window
        );
        assert_eq!(report.finished.status, SessionStatus::Stopped);
        assert!(report.events.iter().any(|e| matches!(
            e,
            SessionEvent::SessionEnded {
                reason: EndReason::Platform,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn refusals_settle_without_ending() {
        for (flag, status) in [
            ("cancel", SessionStatus::Cancelled),
            ("deny", SessionStatus::Denied),
            ("fail", SessionStatus::Error),
            ("unsupported", SessionStatus::Error),
            ("insecure", SessionStatus::Error),
        ] {
            let report = run(&args(&["--outcome", flag]), &ScreenCheckConfig::default()).await;
            assert_eq!(report.started.status, status, "--outcome {flag}");
            assert_eq!(report.finished, report.started, "--outcome {flag}");
        }
    }

    #[tokio::test]
    async fn config_flows_into_the_manager() {
        let mut config = ScreenCheckConfig::default();
        config.classification.permission_cancel_keywords = vec!["denied".into()];

        // "Permission denied" now reads as a cancellation.
        let report = run(&args(&["--outcome", "deny"]), &config).await;
        assert_eq!(report.started.status, SessionStatus::Cancelled);
        assert_eq!(
            report.started.error.unwrap().kind,
            SessionErrorKind::Cancelled
        );
    }

    #[test]
    fn session_config_copies_capture_settings() {
        let mut config = ScreenCheckConfig::default();
        config.capture.frame_rate_ideal = 24;
        config.capture.event_capacity = 8;
        let session = session_config(&config);
        assert_eq!(session.frame_rate_ideal, 24);
        assert_eq!(session.event_capacity, 8);
        assert_eq!(session.classification, ClassificationPolicy::default());
    }

    #[test]
    fn report_serializes_to_json() {
        let snapshot = SessionSnapshot {
            status: SessionStatus::Idle,
            metadata: None,
            error: None,
            has_stream: false,
            is_supported: true,
        };
        let report = Report {
            started: snapshot.clone(),
            finished: snapshot,
            events: Vec::new(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"status\":\"idle\""));
        assert!(json.contains("\"events\":[]"));
    }
}
