//! Question/answer transcript kept by the policy navigator.

use serde::{Deserialize, Serialize};

use crate::audit::ChatResponse;
use crate::error::CoreError;
use crate::types::Timestamp;

/// Source label shown when the backend attributed no document.
pub const UNKNOWN_SOURCE_LABEL: &str = "Unknown source";

/// Reader feedback on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Helpful,
    NotHelpful,
}

/// One exchange as shown in the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaHistoryEntry {
    /// Client-generated, time-ordered identifier (`qa-<uuid v7>`).
    pub id: String,
    pub question: String,
    pub answer: String,
    pub source: String,
    pub page: Option<u32>,
    /// 0.0 - 1.0.
    pub confidence: Option<f64>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub feedback: Option<Feedback>,
}

impl QaHistoryEntry {
    /// Build an entry from a backend answer.
    ///
    /// `question` is the caller's own input, kept verbatim; the echoed
    /// question in the response is not trusted for display.
    pub fn from_response(question: &str, response: &ChatResponse, now: Timestamp) -> Self {
        let source = response
            .sources
            .as_ref()
            .map(|s| s.filename.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_SOURCE_LABEL)
            .to_string();

        Self {
            id: format!("qa-{}", uuid::Uuid::now_v7()),
            question: question.to_string(),
            answer: response.answer.clone(),
            source,
            page: None,
            confidence: None,
            created_at: now,
            feedback: None,
        }
    }

    /// Confidence as a whole percentage, e.g. `95` for `0.95`.
    pub fn confidence_percent(&self) -> Option<u32> {
        self.confidence
            .map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u32)
    }
}

/// Newest-first transcript. Entries are only ever prepended.
#[derive(Debug, Clone, Default)]
pub struct QaHistory {
    entries: Vec<QaHistoryEntry>,
}

impl QaHistory {
    /// Seed the transcript. `entries` must already be newest first.
    pub fn new(entries: Vec<QaHistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn prepend(&mut self, entry: QaHistoryEntry) {
        self.entries.insert(0, entry);
    }

    pub fn entries(&self) -> &[QaHistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&QaHistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record feedback on an entry, replacing any earlier feedback.
    pub fn set_feedback(&mut self, id: &str, feedback: Feedback) -> Result<(), CoreError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "qa_history_entry",
                id: id.to_string(),
            })?;
        entry.feedback = Some(feedback);
        Ok(())
    }
}
