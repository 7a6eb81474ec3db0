//! In-process notice feed backed by a `tokio::sync::broadcast` channel.
//!
//! [`NoticeBus`] carries the save/load outcome messages the settings UI
//! surfaces as transient banners. It is designed to be shared alongside
//! the manager and subscribed to by any number of renderers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Outcome severity of a sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Success,
    Error,
}

/// A user-facing status message emitted by the sync engine.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
    /// When the notice was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    /// Create a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Success,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// NoticeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out bus for [`Notice`]s.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published notice.
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed notices are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notice to all current subscribers.
    ///
    /// If there are no active subscribers the notice is silently dropped;
    /// nothing waits on banner delivery.
    pub fn publish(&self, notice: Notice) {
        // Ignore the SendError, it only means there are zero receivers.
        let _ = self.sender.send(notice);
    }

    /// Subscribe to all notices published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = NoticeBus::default();
        let mut rx = bus.subscribe();

        bus.publish(Notice::success("Preferences saved"));

        let received = rx.recv().await.expect("should receive the notice");
        assert_eq!(received.severity, NoticeSeverity::Success);
        assert_eq!(received.message, "Preferences saved");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_notice() {
        let bus = NoticeBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Notice::error("Save failed"));

        let n1 = rx1.recv().await.expect("subscriber 1 should receive");
        let n2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(n1.severity, NoticeSeverity::Error);
        assert_eq!(n2.message, "Save failed");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = NoticeBus::default();
        // No subscribers; this must not panic.
        bus.publish(Notice::success("orphan"));
    }
}
