//! Headless screen controllers.
//!
//! Each controller owns the state and transitions of one screen. Backend
//! calls go through an [`AuditGateway`](auditguardian_gateway::AuditGateway);
//! outcomes and phase changes are published on a shared
//! [`EventBus`](auditguardian_events::EventBus).
//!
//! - [`action`]: Idle / Pending / Settled guard shared by every action.
//! - [`dashboard`]: headline stats, severity chart and activity feed.
//! - [`policy_navigator`]: policy search, Q&A transcript, policy upload.
//! - [`transaction_sentinel`]: anomaly table, filters, analysis runs.
//! - [`auto_reporter`]: findings list and editor.
//! - [`settings`]: settings sections and API key visibility.
//! - [`shell`]: navigation between screens.

pub mod action;
pub mod auto_reporter;
pub mod dashboard;
pub mod error;
pub mod policy_navigator;
pub mod settings;
pub mod shell;
pub mod transaction_sentinel;
pub mod upload_modal;

pub use action::{ActionGuard, PendingAction};
pub use auto_reporter::{AutoReporter, FindingField, ViewMode};
pub use dashboard::Dashboard;
pub use error::{ScreenError, ScreenResult};
pub use policy_navigator::PolicyNavigator;
pub use settings::{Settings, SettingsSection};
pub use shell::{Screen, Shell};
pub use transaction_sentinel::{AnalysisOutcome, TransactionSentinel};
pub use upload_modal::{UploadModal, UploadSource};
