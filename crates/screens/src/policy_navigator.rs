//! Policy navigator: policy library search, the document Q&A transcript
//! and the policy upload dialog.

use std::sync::Arc;

use auditguardian_core::audit::AuditResult;
use auditguardian_core::fixtures;
use auditguardian_core::policy::{search_policies, Policy};
use auditguardian_core::qa::{Feedback, QaHistory, QaHistoryEntry};
use auditguardian_core::upload::{validate_upload, POLICY_DOCUMENT_UPLOAD};
use auditguardian_events::{ActionPhase, EventBus, Notification};
use auditguardian_gateway::{AuditGateway, UploadFile};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::action::ActionGuard;
use crate::error::{ScreenError, ScreenResult};
use crate::upload_modal::{UploadModal, UploadSource};

pub const SCREEN: &str = "policy_navigator";
pub const ASK_ACTION: &str = "ask";
pub const UPLOAD_ACTION: &str = "upload";

#[derive(Default)]
struct NavigatorState {
    search_query: String,
    selected_policy: Option<String>,
    question_draft: String,
    history: QaHistory,
    upload_modal: UploadModal,
    last_audit: Option<AuditResult>,
}

/// Controller for the policy navigator screen.
///
/// Ask and upload are guarded separately, so one can be Pending while the
/// other runs. No lock is held across a backend call.
pub struct PolicyNavigator<G> {
    gateway: Arc<G>,
    policies: Vec<Policy>,
    state: RwLock<NavigatorState>,
    ask_action: ActionGuard,
    upload_action: ActionGuard,
}

impl<G: AuditGateway> PolicyNavigator<G> {
    /// Controller over the fixture policy library and Q&A history.
    pub fn new(gateway: Arc<G>, bus: Arc<EventBus>) -> Self {
        Self::with_data(
            gateway,
            bus,
            fixtures::policies(),
            QaHistory::new(fixtures::qa_history()),
        )
    }

    pub fn with_data(
        gateway: Arc<G>,
        bus: Arc<EventBus>,
        policies: Vec<Policy>,
        history: QaHistory,
    ) -> Self {
        Self {
            gateway,
            policies,
            state: RwLock::new(NavigatorState {
                history,
                ..Default::default()
            }),
            ask_action: ActionGuard::new(SCREEN, ASK_ACTION, bus.clone()),
            upload_action: ActionGuard::new(SCREEN, UPLOAD_ACTION, bus),
        }
    }

    // ---- policy library ----

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.state.write().await.search_query = query.into();
    }

    /// Policies matching the current search query.
    pub async fn visible_policies(&self) -> Vec<Policy> {
        let state = self.state.read().await;
        search_policies(&self.policies, &state.search_query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn select_policy(&self, id: &str) -> ScreenResult<Policy> {
        let policy = self
            .policies
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ScreenError::not_found("policy", id))?;
        self.state.write().await.selected_policy = Some(policy.id.clone());
        Ok(policy)
    }

    pub async fn selected_policy(&self) -> Option<Policy> {
        let state = self.state.read().await;
        let id = state.selected_policy.as_deref()?;
        self.policies.iter().find(|p| p.id == id).cloned()
    }

    // ---- Q&A ----

    pub fn ask_phase(&self) -> ActionPhase {
        self.ask_action.phase()
    }

    /// Replace the question draft. Rejected while an ask is Pending.
    pub async fn set_question_draft(&self, text: impl Into<String>) -> ScreenResult<()> {
        if self.ask_action.is_pending() {
            return Err(ScreenError::Busy {
                screen: SCREEN,
                action: ASK_ACTION,
            });
        }
        self.state.write().await.question_draft = text.into();
        Ok(())
    }

    pub async fn question_draft(&self) -> String {
        self.state.read().await.question_draft.clone()
    }

    /// Submit the current draft.
    ///
    /// A blank draft is a no-op and returns `Ok(None)`. On success the new
    /// entry is prepended to the transcript and the draft is cleared. On
    /// failure the draft is kept and one error notification is published.
    pub async fn submit_question(&self) -> ScreenResult<Option<QaHistoryEntry>> {
        let question = self.state.read().await.question_draft.clone();
        if question.trim().is_empty() {
            return Ok(None);
        }

        let pending = self.ask_action.begin()?;
        match self.gateway.ask_question(&question).await {
            Ok(response) => {
                let entry = QaHistoryEntry::from_response(&question, &response, Utc::now());
                {
                    let mut state = self.state.write().await;
                    state.history.prepend(entry.clone());
                    state.question_draft.clear();
                }
                tracing::info!(entry_id = %entry.id, source = %entry.source, "Question answered");
                pending.succeed();
                Ok(Some(entry))
            }
            Err(e) => {
                pending.fail("Could not get an answer", &e);
                Err(e.into())
            }
        }
    }

    /// Set the draft and submit it in one step.
    pub async fn ask(&self, question: impl Into<String>) -> ScreenResult<Option<QaHistoryEntry>> {
        self.set_question_draft(question).await?;
        self.submit_question().await
    }

    /// Transcript, newest first.
    pub async fn history(&self) -> Vec<QaHistoryEntry> {
        self.state.read().await.history.entries().to_vec()
    }

    pub async fn set_feedback(&self, entry_id: &str, feedback: Feedback) -> ScreenResult<()> {
        self.state
            .write()
            .await
            .history
            .set_feedback(entry_id, feedback)?;
        Ok(())
    }

    // ---- policy upload ----

    pub fn upload_phase(&self) -> ActionPhase {
        self.upload_action.phase()
    }

    pub async fn upload_modal(&self) -> UploadModal {
        self.state.read().await.upload_modal
    }

    pub async fn open_upload(&self) {
        self.state.write().await.upload_modal.open();
    }

    pub async fn close_upload(&self) {
        self.state.write().await.upload_modal.close();
    }

    pub async fn drag_enter(&self) {
        self.state.write().await.upload_modal.drag_enter();
    }

    pub async fn drag_leave(&self) {
        self.state.write().await.upload_modal.drag_leave();
    }

    /// Validate and audit a policy document.
    ///
    /// Only `.pdf` and `.docx` files up to 50 MB are sent; anything else
    /// fails validation with a notification and no network call. On
    /// success the result is kept, the dialog closes and a success
    /// notification is published.
    pub async fn upload_policy(
        &self,
        file: UploadFile,
        source: UploadSource,
    ) -> ScreenResult<AuditResult> {
        self.state.write().await.upload_modal.file_chosen();

        if let Err(e) = validate_upload(&file.filename, file.size(), &POLICY_DOCUMENT_UPLOAD) {
            self.upload_action
                .notify(Notification::error("Unsupported file", e.to_string()));
            return Err(e.into());
        }

        let pending = self.upload_action.begin()?;
        tracing::debug!(filename = %file.filename, ?source, "Uploading policy document");

        match self.gateway.upload_file(file).await {
            Ok(result) => {
                {
                    let mut state = self.state.write().await;
                    state.last_audit = Some(result.clone());
                    state.upload_modal.close();
                }
                self.upload_action.notify(Notification::success(
                    "Policy audited",
                    format!("{}: {} (score {})", result.filename, result.status, result.score),
                ));
                pending.succeed();
                Ok(result)
            }
            Err(e) => {
                pending.fail("Upload failed", &e);
                Err(e.into())
            }
        }
    }

    /// Result of the most recent successful policy upload.
    pub async fn last_audit(&self) -> Option<AuditResult> {
        self.state.read().await.last_audit.clone()
    }
}
