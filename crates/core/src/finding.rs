//! Audit findings written in condition / criteria / cause / effect form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::filter::Filter;
use crate::transaction::Severity;
use crate::types::Date;

/// Maximum length of a finding title, in characters after trimming.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a single condition / criteria / cause / effect section,
/// in characters.
pub const MAX_SECTION_LENGTH: usize = 10_000;

crate::open_enum! {
    /// Workflow state of a finding.
    pub enum FindingStatus {
        Draft => "draft",
        UnderReview => "under-review",
        Approved => "approved",
        Resolved => "resolved",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub status: FindingStatus,
    pub created_at: Date,
    /// What was observed.
    pub condition: String,
    /// The rule it was measured against.
    pub criteria: String,
    pub cause: String,
    pub effect: String,
    pub related_transactions: Vec<String>,
    pub related_policy: String,
}

/// Editable copy of the free-text parts of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindingDraft {
    pub title: String,
    pub condition: String,
    pub criteria: String,
    pub cause: String,
    pub effect: String,
}

impl FindingDraft {
    pub fn from_finding(finding: &Finding) -> Self {
        Self {
            title: finding.title.clone(),
            condition: finding.condition.clone(),
            criteria: finding.criteria.clone(),
            cause: finding.cause.clone(),
            effect: finding.effect.clone(),
        }
    }

    /// Check the draft before it replaces the stored text.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation(
                "Finding title must not be empty".to_string(),
            ));
        }
        if self.title.trim().chars().count() > MAX_TITLE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Finding title exceeds {MAX_TITLE_LENGTH} characters"
            )));
        }

        let sections = [
            ("condition", &self.condition),
            ("criteria", &self.criteria),
            ("cause", &self.cause),
            ("effect", &self.effect),
        ];
        for (name, text) in sections {
            if text.chars().count() > MAX_SECTION_LENGTH {
                return Err(CoreError::Validation(format!(
                    "Finding {name} exceeds {MAX_SECTION_LENGTH} characters"
                )));
            }
        }

        Ok(())
    }

    /// Write the draft into `finding`. Other fields are untouched.
    pub fn apply_to(&self, finding: &mut Finding) {
        finding.title = self.title.trim().to_string();
        finding.condition = self.condition.clone();
        finding.criteria = self.criteria.clone();
        finding.cause = self.cause.clone();
        finding.effect = self.effect.clone();
    }
}

/// Findings whose status passes the filter, in input order.
pub fn filter_findings<'a>(findings: &'a [Finding], status: &Filter<FindingStatus>) -> Vec<&'a Finding> {
    findings.iter().filter(|f| status.matches(&f.status)).collect()
}

/// Counters for the auto-reporter header cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FindingStats {
    pub draft: usize,
    pub under_review: usize,
    pub approved: usize,
}

impl FindingStats {
    pub fn compute(findings: &[Finding]) -> Self {
        let count = |status: FindingStatus| findings.iter().filter(|f| f.status == status).count();
        Self {
            draft: count(FindingStatus::Draft),
            under_review: count(FindingStatus::UnderReview),
            approved: count(FindingStatus::Approved),
        }
    }
}
