//! Line-oriented terminal front end for the AuditGuardian screens.

pub mod app;
pub mod command;
pub mod notifications;
