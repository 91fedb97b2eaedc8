//! In-process UI event bus.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`UiEvent`]: either a user-facing [`Notification`] (a "toast") or an
//!   [`ActionEvent`] reporting a screen action's phase change.

pub mod bus;
pub mod notification;

pub use bus::{ActionEvent, ActionPhase, EventBus, UiEvent};
pub use notification::{Notification, NotificationLevel};
