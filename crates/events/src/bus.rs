//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans every [`UiEvent`] out to all subscribers. It is
//! shared via `Arc<EventBus>` between the shell, every screen controller
//! and whatever front end renders them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::notification::Notification;

// ---------------------------------------------------------------------------
// ActionEvent
// ---------------------------------------------------------------------------

/// Phase of one screen action (ask, upload, analyze, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl ActionPhase {
    /// `Succeeded` and `Failed` are the settled phases.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// A screen action moved to a new phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    /// Screen name, e.g. `"policy_navigator"`.
    pub screen: String,
    /// Action name within the screen, e.g. `"ask"`.
    pub action: String,
    pub phase: ActionPhase,
    pub timestamp: DateTime<Utc>,
}

impl ActionEvent {
    pub fn new(screen: impl Into<String>, action: impl Into<String>, phase: ActionPhase) -> Self {
        Self {
            screen: screen.into(),
            action: action.into(),
            phase,
            timestamp: Utc::now(),
        }
    }

    /// Whether this event belongs to the given screen action.
    pub fn is_for(&self, screen: &str, action: &str) -> bool {
        self.screen == screen && self.action == action
    }
}

// ---------------------------------------------------------------------------
// UiEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEvent {
    Notification(Notification),
    Action(ActionEvent),
}

impl UiEvent {
    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Self::Notification(n) => Some(n),
            Self::Action(_) => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionEvent> {
        match self {
            Self::Action(a) => Some(a),
            Self::Notification(_) => None,
        }
    }
}

impl From<Notification> for UiEvent {
    fn from(notification: Notification) -> Self {
        Self::Notification(notification)
    }
}

impl From<ActionEvent> for UiEvent {
    fn from(event: ActionEvent) -> Self {
        Self::Action(event)
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use auditguardian_events::{EventBus, Notification};
///
/// let bus = EventBus::default();
/// let _rx = bus.subscribe();
///
/// bus.notify(Notification::success("Policy uploaded", ""));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<UiEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is silently dropped.
    pub fn publish(&self, event: impl Into<UiEvent>) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event.into());
    }

    pub fn notify(&self, notification: Notification) {
        self.publish(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
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
    use crate::notification::NotificationLevel;

    #[tokio::test]
    async fn publish_and_receive_notification() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.notify(Notification::error("Upload failed", "connection refused"));

        let received = rx.recv().await.expect("should receive the event");
        let notification = received.as_notification().expect("notification");
        assert_eq!(notification.level, NotificationLevel::Error);
        assert_eq!(notification.title, "Upload failed");
        assert!(received.as_action().is_none());
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(ActionEvent::new("policy_navigator", "ask", ActionPhase::Pending));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1, e2);
        assert!(e1.as_action().unwrap().is_for("policy_navigator", "ask"));
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.notify(Notification::info("orphan", ""));
    }

    #[test]
    fn settled_phases() {
        assert!(ActionPhase::Succeeded.is_settled());
        assert!(ActionPhase::Failed.is_settled());
        assert!(!ActionPhase::Pending.is_settled());
        assert!(!ActionPhase::Idle.is_settled());
    }

    #[test]
    fn events_serialize_with_kind_tag() {
        let event = UiEvent::from(ActionEvent::new("transaction_sentinel", "analyze", ActionPhase::Failed));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "action");
        assert_eq!(json["phase"], "failed");
        assert_eq!(json["screen"], "transaction_sentinel");
    }
}
