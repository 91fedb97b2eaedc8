//! Auto-reporter: the generated findings list and the finding editor.
//!
//! Everything here is synchronous. Saved edits change this controller's
//! copy of the findings only.

use std::sync::Arc;

use auditguardian_core::filter::Filter;
use auditguardian_core::finding::{filter_findings, Finding, FindingDraft, FindingStats, FindingStatus};
use auditguardian_core::fixtures;
use auditguardian_events::{EventBus, Notification};
use serde::Serialize;

use crate::error::{ScreenError, ScreenResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "grid" => Some(Self::Grid),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// Free-text part of a finding the editor can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingField {
    Title,
    Condition,
    Criteria,
    Cause,
    Effect,
}

impl FindingField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "condition" => Some(Self::Condition),
            "criteria" => Some(Self::Criteria),
            "cause" => Some(Self::Cause),
            "effect" => Some(Self::Effect),
            _ => None,
        }
    }
}

pub struct AutoReporter {
    findings: Vec<Finding>,
    view_mode: ViewMode,
    status_filter: Filter<FindingStatus>,
    selected: Option<String>,
    editing: bool,
    draft: Option<FindingDraft>,
    bus: Arc<EventBus>,
}

impl AutoReporter {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self::with_findings(bus, fixtures::findings())
    }

    pub fn with_findings(bus: Arc<EventBus>, findings: Vec<Finding>) -> Self {
        Self {
            findings,
            view_mode: ViewMode::default(),
            status_filter: Filter::All,
            selected: None,
            editing: false,
            draft: None,
            bus,
        }
    }

    // ---- list ----

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// `"all"` or a status such as `"under-review"`.
    pub fn set_status_filter(&mut self, raw: &str) {
        self.status_filter = Filter::parse(raw);
    }

    pub fn status_filter(&self) -> &Filter<FindingStatus> {
        &self.status_filter
    }

    pub fn visible(&self) -> Vec<&Finding> {
        filter_findings(&self.findings, &self.status_filter)
    }

    pub fn stats(&self) -> FindingStats {
        FindingStats::compute(&self.findings)
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    // ---- detail & editor ----

    /// Open a finding in preview mode with a fresh draft.
    pub fn select(&mut self, id: &str) -> ScreenResult<&Finding> {
        let index = self.index_of(id)?;
        self.selected = Some(id.to_string());
        self.editing = false;
        self.draft = Some(FindingDraft::from_finding(&self.findings[index]));
        Ok(&self.findings[index])
    }

    pub fn selected(&self) -> Option<&Finding> {
        let id = self.selected.as_deref()?;
        self.findings.iter().find(|f| f.id == id)
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn draft(&self) -> Option<&FindingDraft> {
        self.draft.as_ref()
    }

    /// Switch between edit and preview. The draft survives the switch.
    pub fn toggle_edit(&mut self) -> ScreenResult<bool> {
        if self.selected.is_none() {
            return Err(ScreenError::validation("No finding is selected"));
        }
        self.editing = !self.editing;
        Ok(self.editing)
    }

    pub fn edit(&mut self, field: FindingField, text: impl Into<String>) -> ScreenResult<()> {
        if !self.editing {
            return Err(ScreenError::validation("The finding is not in edit mode"));
        }
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| ScreenError::validation("No finding is selected"))?;

        let slot = match field {
            FindingField::Title => &mut draft.title,
            FindingField::Condition => &mut draft.condition,
            FindingField::Criteria => &mut draft.criteria,
            FindingField::Cause => &mut draft.cause,
            FindingField::Effect => &mut draft.effect,
        };
        *slot = text.into();
        Ok(())
    }

    /// Validate the draft and write it into the selected finding.
    /// Leaves edit mode on success; an invalid draft stays in the editor.
    pub fn save(&mut self) -> ScreenResult<&Finding> {
        let id = self
            .selected
            .clone()
            .ok_or_else(|| ScreenError::validation("No finding is selected"))?;
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| ScreenError::validation("No finding is selected"))?;
        draft.validate()?;

        let index = self.index_of(&id)?;
        draft.apply_to(&mut self.findings[index]);
        self.editing = false;
        self.draft = Some(FindingDraft::from_finding(&self.findings[index]));

        tracing::info!(finding_id = %id, "Finding saved");
        self.bus
            .notify(Notification::success("Finding saved", id));
        Ok(&self.findings[index])
    }

    /// Drop unsaved edits and return to preview.
    pub fn cancel(&mut self) {
        self.editing = false;
        self.draft = self.selected().map(FindingDraft::from_finding);
    }

    /// Close the detail view.
    pub fn close(&mut self) {
        self.selected = None;
        self.editing = false;
        self.draft = None;
    }

    fn index_of(&self, id: &str) -> ScreenResult<usize> {
        self.findings
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ScreenError::not_found("finding", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter() -> AutoReporter {
        AutoReporter::new(Arc::new(EventBus::default()))
    }

    #[test]
    fn status_filter_and_stats() {
        let mut reporter = reporter();
        assert_eq!(reporter.visible().len(), 8);

        reporter.set_status_filter("draft");
        assert_eq!(reporter.visible().len(), 4);
        reporter.set_status_filter("under-review");
        assert_eq!(reporter.visible().len(), 2);

        let stats = reporter.stats();
        assert_eq!((stats.draft, stats.under_review, stats.approved), (4, 2, 1));
    }

    #[test]
    fn view_mode_toggles() {
        let mut reporter = reporter();
        assert_eq!(reporter.view_mode(), ViewMode::Grid);
        reporter.set_view_mode(ViewMode::parse("LIST").unwrap());
        assert_eq!(reporter.view_mode(), ViewMode::List);
        assert!(ViewMode::parse("table").is_none());
    }

    #[test]
    fn edit_requires_edit_mode() {
        let mut reporter = reporter();
        reporter.select("FND-001").unwrap();
        assert!(reporter.edit(FindingField::Title, "x").is_err());

        assert!(reporter.toggle_edit().unwrap());
        reporter.edit(FindingField::Cause, "Urgency override").unwrap();
        assert_eq!(reporter.draft().unwrap().cause, "Urgency override");
    }

    #[test]
    fn save_updates_local_copy_only() {
        let mut reporter = reporter();
        reporter.select("FND-002").unwrap();
        reporter.toggle_edit().unwrap();
        reporter.edit(FindingField::Title, "  Travel expenses over limit  ").unwrap();

        let saved = reporter.save().unwrap();
        assert_eq!(saved.title, "Travel expenses over limit");
        assert!(!reporter.is_editing());
        assert_ne!(fixtures::findings()[1].title, "Travel expenses over limit");
    }

    #[test]
    fn invalid_draft_is_not_saved() {
        let mut reporter = reporter();
        reporter.select("FND-003").unwrap();
        let original = reporter.selected().unwrap().title.clone();
        reporter.toggle_edit().unwrap();
        reporter.edit(FindingField::Title, "   ").unwrap();

        assert!(matches!(reporter.save(), Err(ScreenError::Core(_))));
        assert!(reporter.is_editing());
        assert_eq!(reporter.selected().unwrap().title, original);
    }

    #[test]
    fn cancel_discards_and_close_clears() {
        let mut reporter = reporter();
        reporter.select("FND-004").unwrap();
        reporter.toggle_edit().unwrap();
        reporter.edit(FindingField::Effect, "changed").unwrap();

        reporter.cancel();
        assert!(!reporter.is_editing());
        assert_ne!(reporter.draft().unwrap().effect, "changed");

        reporter.close();
        assert!(reporter.selected().is_none());
        assert!(reporter.draft().is_none());
    }

    #[test]
    fn unknown_finding_is_not_found() {
        let mut reporter = reporter();
        assert!(matches!(
            reporter.select("FND-404"),
            Err(ScreenError::NotFound { entity: "finding", .. })
        ));
        assert!(reporter.toggle_edit().is_err());
    }
}
