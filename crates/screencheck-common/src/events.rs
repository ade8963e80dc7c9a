use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::SessionId;
use crate::types::{EndReason, SessionStatus, StreamMetadata};

/// Notifications published by the session manager as its state moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    StatusChanged {
        from: SessionStatus,
        to: SessionStatus,
    },
    StreamAcquired {
        session_id: SessionId,
        metadata: Option<StreamMetadata>,
    },
    SessionEnded {
        session_id: SessionId,
        reason: EndReason,
    },
}

pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: SessionEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_status_change() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(SessionEvent::StatusChanged {
            from: SessionStatus::Idle,
            to: SessionStatus::Requesting,
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            SessionEvent::StatusChanged {
                from: SessionStatus::Idle,
                to: SessionStatus::Requesting,
            }
        );
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        let count = bus.publish(SessionEvent::SessionEnded {
            session_id: SessionId::new(),
            reason: EndReason::Caller,
        });
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn every_subscriber_sees_the_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        let sid = SessionId::new();

        let count = bus.publish(SessionEvent::SessionEnded {
            session_id: sid.clone(),
            reason: EndReason::Platform,
        });
        assert_eq!(count, 2);

        for rx in [&mut rx1, &mut rx2] {
            let event = rx.recv().await.unwrap();
            assert!(matches!(
                event,
                SessionEvent::SessionEnded { ref session_id, reason: EndReason::Platform }
                    if *session_id == sid
            ));
        }
    }

    #[test]
    fn event_json_is_tagged() {
        let event = SessionEvent::StatusChanged {
            from: SessionStatus::Active,
            to: SessionStatus::Stopped,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"StatusChanged","data":{"from":"active","to":"stopped"}}"#
        );
    }
}
