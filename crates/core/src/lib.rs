//! AuditGuardian domain layer.
//!
//! Wire types shared with the audit backend, the fixture datasets the
//! screens render, and the pure filtering and validation helpers that sit
//! between them. No I/O happens in this crate.

pub mod activity;
pub mod audit;
pub mod error;
pub mod filter;
pub mod finding;
pub mod fixtures;
pub mod open_enum;
pub mod policy;
pub mod qa;
pub mod transaction;
pub mod types;
pub mod upload;
