//! Transaction sentinel: anomaly table, filters, transaction data upload
//! and analysis runs.

use std::sync::Arc;

use auditguardian_core::audit::AuditResult;
use auditguardian_core::filter::Filter;
use auditguardian_core::fixtures;
use auditguardian_core::transaction::{export_csv, AnomalyFilter, AnomalyStats, Transaction};
use auditguardian_core::upload::{validate_upload, TRANSACTION_DATA_UPLOAD};
use auditguardian_events::{ActionPhase, EventBus, Notification};
use auditguardian_gateway::{AuditGateway, UploadFile};
use tokio::sync::RwLock;

use crate::action::ActionGuard;
use crate::error::{ScreenError, ScreenResult};
use crate::upload_modal::{UploadModal, UploadSource};

pub const SCREEN: &str = "transaction_sentinel";
pub const ANALYZE_ACTION: &str = "analyze";

/// What the last analysis run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// A staged file was audited by the backend.
    Audited(AuditResult),
    /// No file was staged; the loaded transactions were re-scanned.
    Rescanned(AnomalyStats),
}

#[derive(Default)]
struct SentinelState {
    filter: AnomalyFilter,
    selected: Option<String>,
    upload_modal: UploadModal,
    staged: Option<UploadFile>,
    /// Bumped on every successful stage; an analysis only unstages the
    /// file it read.
    staged_generation: u64,
    last_analysis: Option<AnalysisOutcome>,
}

pub struct TransactionSentinel<G> {
    gateway: Arc<G>,
    transactions: Vec<Transaction>,
    state: RwLock<SentinelState>,
    analyze_action: ActionGuard,
}

impl<G: AuditGateway> TransactionSentinel<G> {
    pub fn new(gateway: Arc<G>, bus: Arc<EventBus>) -> Self {
        Self::with_transactions(gateway, bus, fixtures::transactions())
    }

    pub fn with_transactions(
        gateway: Arc<G>,
        bus: Arc<EventBus>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            gateway,
            transactions,
            state: RwLock::new(SentinelState::default()),
            analyze_action: ActionGuard::new(SCREEN, ANALYZE_ACTION, bus),
        }
    }

    // ---- table ----

    /// `"all"` or a severity such as `"high"`.
    pub async fn set_severity_filter(&self, raw: &str) {
        self.state.write().await.filter.severity = Filter::parse(raw);
    }

    /// `"all"` or a status such as `"new"`.
    pub async fn set_status_filter(&self, raw: &str) {
        self.state.write().await.filter.status = Filter::parse(raw);
    }

    pub async fn filter(&self) -> AnomalyFilter {
        self.state.read().await.filter.clone()
    }

    /// Anomalies passing the current filters, in table order.
    pub async fn visible_anomalies(&self) -> Vec<Transaction> {
        let state = self.state.read().await;
        state
            .filter
            .apply(&self.transactions)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Header counters over the full data set; filters do not apply.
    pub fn stats(&self) -> AnomalyStats {
        AnomalyStats::compute(&self.transactions)
    }

    pub async fn select(&self, id: &str) -> ScreenResult<Transaction> {
        let transaction = self
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ScreenError::not_found("transaction", id))?;
        self.state.write().await.selected = Some(transaction.id.clone());
        Ok(transaction)
    }

    pub async fn selected(&self) -> Option<Transaction> {
        let state = self.state.read().await;
        let id = state.selected.as_deref()?;
        self.transactions.iter().find(|t| t.id == id).cloned()
    }

    pub async fn clear_selection(&self) {
        self.state.write().await.selected = None;
    }

    /// CSV of the currently visible anomalies.
    pub async fn export_csv(&self) -> String {
        let state = self.state.read().await;
        export_csv(&state.filter.apply(&self.transactions))
    }

    // ---- upload & analysis ----

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

    /// Stage a `.csv`, `.xls` or `.xlsx` file for the next analysis run.
    /// Replaces any earlier staged file. Rejected while an analysis runs.
    pub async fn stage_file(&self, file: UploadFile, source: UploadSource) -> ScreenResult<()> {
        // `analyze` begins under this lock too, so the check cannot race it.
        let mut state = self.state.write().await;
        if self.analyze_action.is_pending() {
            return Err(ScreenError::Busy {
                screen: SCREEN,
                action: ANALYZE_ACTION,
            });
        }
        state.upload_modal.file_chosen();

        if let Err(e) = validate_upload(&file.filename, file.size(), &TRANSACTION_DATA_UPLOAD) {
            self.analyze_action
                .notify(Notification::error("Unsupported file", e.to_string()));
            return Err(e.into());
        }

        tracing::debug!(filename = %file.filename, ?source, "Transaction file staged");
        self.analyze_action.notify(Notification::info(
            "File ready",
            format!("{} will be analyzed on the next run", file.filename),
        ));
        state.staged = Some(file);
        state.staged_generation += 1;
        state.upload_modal.close();
        Ok(())
    }

    pub async fn staged_filename(&self) -> Option<String> {
        self.state
            .read()
            .await
            .staged
            .as_ref()
            .map(|f| f.filename.clone())
    }

    pub fn analyze_phase(&self) -> ActionPhase {
        self.analyze_action.phase()
    }

    /// Run an analysis.
    ///
    /// With a staged file the file is audited through the backend and is
    /// unstaged on success; a failure keeps it staged for a retry. With
    /// nothing staged the loaded transactions are re-scanned locally.
    pub async fn analyze(&self) -> ScreenResult<AnalysisOutcome> {
        let (pending, staged, generation) = {
            let state = self.state.write().await;
            let pending = self.analyze_action.begin()?;
            (pending, state.staged.clone(), state.staged_generation)
        };

        let outcome = match staged {
            Some(file) => match self.gateway.upload_file(file).await {
                Ok(result) => {
                    self.analyze_action.notify(Notification::success(
                        "Analysis complete",
                        format!("{}: {}", result.filename, result.status),
                    ));
                    let mut state = self.state.write().await;
                    if state.staged_generation == generation {
                        state.staged = None;
                    }
                    AnalysisOutcome::Audited(result)
                }
                Err(e) => {
                    pending.fail("Analysis failed", &e);
                    return Err(e.into());
                }
            },
            None => {
                let stats = self.stats();
                self.analyze_action.notify(Notification::success(
                    "Analysis complete",
                    format!(
                        "{} anomalies in {} transactions",
                        stats.anomalies, stats.transactions_scanned
                    ),
                ));
                AnalysisOutcome::Rescanned(stats)
            }
        };

        self.state.write().await.last_analysis = Some(outcome.clone());
        pending.succeed();
        Ok(outcome)
    }

    pub async fn last_analysis(&self) -> Option<AnalysisOutcome> {
        self.state.read().await.last_analysis.clone()
    }

    pub async fn has_analyzed(&self) -> bool {
        self.state.read().await.last_analysis.is_some()
    }
}
