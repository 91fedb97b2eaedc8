//! Wire contract with the audit backend.
//!
//! [`AuditResult`] is the body of `POST /audit-file/`, [`ChatResponse`]
//! the body of `GET /ask/`. Field values are taken as-is from the
//! backend; the only client-side leniency is around the optional parts
//! of the question-answering response.

use serde::{Deserialize, Deserializer, Serialize};

crate::open_enum! {
    /// Outcome label the backend attaches to an audited document.
    pub enum AuditStatus {
        Passed => "PASSED",
        Warning => "WARNING",
        Failed => "FAILED",
        /// The backend could not process the document.
        Error => "ERROR",
        /// The backend had no status to report.
        Unknown => "UNKNOWN",
    }
}

impl Default for AuditStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Result of submitting one file for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Name of the submitted file, as the backend stored it.
    pub filename: String,
    /// Audit score. Range and meaning belong to the backend.
    pub score: f64,
    pub status: AuditStatus,
    pub summary: String,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Attribution for the most relevant source document of an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAttribution {
    pub filename: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub status: AuditStatus,
}

/// Result of asking one natural-language question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The question echoed back. Empty when the backend answered from a
    /// fallback path that does not echo it.
    #[serde(default)]
    pub question: String,
    pub answer: String,
    /// `None` when the backend found nothing attributable, including the
    /// case where it sends an empty object.
    #[serde(
        default,
        deserialize_with = "empty_object_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sources: Option<SourceAttribution>,
}

fn empty_object_as_none<'de, D>(deserializer: D) -> Result<Option<SourceAttribution>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
