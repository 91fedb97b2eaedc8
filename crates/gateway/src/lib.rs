//! Backend gateway for AuditGuardian.
//!
//! The only part of the application that talks to the network. Exposes
//! the [`AuditGateway`] trait (upload a file for audit, ask a question)
//! and its HTTP implementation [`AuditApi`], along with the typed
//! configuration and error surface.

pub mod api;
pub mod config;
pub mod error;
pub mod file;

pub use api::{AuditApi, AuditGateway};
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use file::UploadFile;
