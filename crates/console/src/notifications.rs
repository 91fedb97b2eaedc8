//! Writes bus notifications to the terminal as they arrive.

use std::io::Write;

use auditguardian_events::UiEvent;
use tokio::sync::broadcast::{self, error::RecvError};

/// Write every notification from `rx` to `out` until the bus is dropped.
///
/// Events still buffered when the bus closes are written before this
/// returns, so awaiting it after dropping the bus flushes the last toasts.
pub async fn forward<W: Write>(mut rx: broadcast::Receiver<UiEvent>, mut out: W) -> W {
    loop {
        match rx.recv().await {
            Ok(UiEvent::Notification(notification)) => {
                if let Err(e) = writeln!(out, "{notification}").and_then(|()| out.flush()) {
                    tracing::warn!(error = %e, "Could not print notification");
                }
            }
            Ok(UiEvent::Action(event)) => {
                tracing::debug!(screen = %event.screen, action = %event.action, phase = ?event.phase, "Action phase");
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Notification printer fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
    out
}
