//! Idle / Pending / Settled bookkeeping shared by every screen action.
//!
//! An [`ActionGuard`] owns the phase of one action (for example the
//! policy navigator's "ask"). [`ActionGuard::begin`] moves it to Pending
//! and hands back a [`PendingAction`]; settling that token publishes the
//! outcome and returns the action to Idle. A token dropped without being
//! settled (the caller's future was cancelled) settles as Failed, so an
//! action can never stay Pending after its caller is gone.

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use auditguardian_events::{ActionEvent, ActionPhase, EventBus, Notification};

use crate::error::ScreenError;

pub struct ActionGuard {
    screen: &'static str,
    action: &'static str,
    pending: AtomicBool,
    bus: Arc<EventBus>,
}

impl ActionGuard {
    pub fn new(screen: &'static str, action: &'static str, bus: Arc<EventBus>) -> Self {
        Self {
            screen,
            action,
            pending: AtomicBool::new(false),
            bus,
        }
    }

    /// Current phase: either `Idle` or `Pending`. Settled phases are
    /// transient and only visible on the event bus.
    pub fn phase(&self) -> ActionPhase {
        if self.is_pending() {
            ActionPhase::Pending
        } else {
            ActionPhase::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Move Idle to Pending.
    ///
    /// Fails with [`ScreenError::Busy`] if the action is already Pending;
    /// the trigger stays disabled until the running call settles.
    pub fn begin(&self) -> Result<PendingAction<'_>, ScreenError> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ScreenError::Busy {
                screen: self.screen,
                action: self.action,
            })?;

        self.emit(ActionPhase::Pending);
        Ok(PendingAction {
            guard: self,
            settled: false,
        })
    }

    /// Publish a notification on this guard's bus.
    pub fn notify(&self, notification: Notification) {
        self.bus.notify(notification);
    }

    fn emit(&self, phase: ActionPhase) {
        self.bus
            .publish(ActionEvent::new(self.screen, self.action, phase));
    }

    fn settle(&self, outcome: ActionPhase) {
        self.emit(outcome);
        self.pending.store(false, Ordering::Release);
        self.emit(ActionPhase::Idle);
    }
}

/// Proof that an action is Pending. Settle it exactly once.
#[must_use = "a pending action must be settled with `succeed` or `fail`"]
pub struct PendingAction<'a> {
    guard: &'a ActionGuard,
    settled: bool,
}

impl PendingAction<'_> {
    /// Settle as Succeeded and return to Idle.
    pub fn succeed(mut self) {
        self.settled = true;
        self.guard.settle(ActionPhase::Succeeded);
    }

    /// Publish one error notification, settle as Failed and return to Idle.
    pub fn fail(mut self, title: &str, error: &dyn Display) {
        self.settled = true;
        tracing::warn!(
            screen = self.guard.screen,
            action = self.guard.action,
            error = %error,
            "Action failed",
        );
        self.guard
            .notify(Notification::error(title, error.to_string()));
        self.guard.settle(ActionPhase::Failed);
    }
}

impl Drop for PendingAction<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(
                screen = self.guard.screen,
                action = self.guard.action,
                "Pending action dropped before settling",
            );
            self.guard.settle(ActionPhase::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast::Receiver;

    use super::*;
    use auditguardian_events::UiEvent;

    fn drain(rx: &mut Receiver<UiEvent>) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn phases(events: &[UiEvent]) -> Vec<ActionPhase> {
        events
            .iter()
            .filter_map(UiEvent::as_action)
            .map(|a| a.phase)
            .collect()
    }

    #[test]
    fn success_walks_pending_succeeded_idle() {
        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let guard = ActionGuard::new("screen", "act", bus);

        let pending = guard.begin().unwrap();
        assert_eq!(guard.phase(), ActionPhase::Pending);
        pending.succeed();
        assert_eq!(guard.phase(), ActionPhase::Idle);

        let events = drain(&mut rx);
        assert_eq!(
            phases(&events),
            vec![ActionPhase::Pending, ActionPhase::Succeeded, ActionPhase::Idle]
        );
        assert!(events.iter().all(|e| e.as_notification().is_none()));
    }

    #[test]
    fn second_begin_while_pending_is_busy() {
        let guard = ActionGuard::new("screen", "act", Arc::new(EventBus::default()));
        let pending = guard.begin().unwrap();

        let err = guard.begin().err().unwrap();
        assert!(err.is_busy());

        pending.succeed();
        assert!(guard.begin().is_ok());
    }

    #[test]
    fn failure_publishes_exactly_one_notification() {
        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let guard = ActionGuard::new("screen", "act", bus);

        guard.begin().unwrap().fail("Upload failed", &"connection refused");

        let events = drain(&mut rx);
        let notifications: Vec<_> = events.iter().filter_map(UiEvent::as_notification).collect();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Upload failed");
        assert_eq!(notifications[0].message, "connection refused");
        assert_eq!(
            phases(&events),
            vec![ActionPhase::Pending, ActionPhase::Failed, ActionPhase::Idle]
        );
    }

    #[test]
    fn dropped_token_returns_to_idle() {
        let bus = Arc::new(EventBus::default());
        let mut rx = bus.subscribe();
        let guard = ActionGuard::new("screen", "act", bus);

        drop(guard.begin().unwrap());

        assert!(!guard.is_pending());
        assert_eq!(
            phases(&drain(&mut rx)),
            vec![ActionPhase::Pending, ActionPhase::Failed, ActionPhase::Idle]
        );
    }
}
