//! Dashboard summary records: recent activity, headline stats and the
//! severity distribution.

use serde::{Deserialize, Serialize};

use crate::finding::Finding;
use crate::transaction::Severity;
use crate::types::Timestamp;

crate::open_enum! {
    pub enum ActivityType {
        Upload => "upload",
        Finding => "finding",
        Analysis => "analysis",
        Question => "question",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub activity_type: ActivityType,
    pub description: String,
    pub timestamp: Timestamp,
    pub user: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsBySeverity {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl FindingsBySeverity {
    /// Count findings per severity. Unrecognised severities are not counted.
    pub fn tally(findings: &[Finding]) -> Self {
        findings
            .iter()
            .fold(Self::default(), |mut acc, f| {
                match f.severity {
                    Severity::High => acc.high += 1,
                    Severity::Medium => acc.medium += 1,
                    Severity::Low => acc.low += 1,
                    Severity::Other(_) => {}
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    /// Chart slices in display order.
    pub fn slices(&self) -> [SeveritySlice; 3] {
        [
            SeveritySlice { label: "High", value: self.high },
            SeveritySlice { label: "Medium", value: self.medium },
            SeveritySlice { label: "Low", value: self.low },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeveritySlice {
    pub label: &'static str,
    pub value: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_policies: usize,
    pub active_transactions: usize,
    pub findings_generated: usize,
    pub findings_by_severity: FindingsBySeverity,
}

/// Time-of-day greeting for a local hour (0-23).
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// Relative label for an activity timestamp.
///
/// Under an hour: `"{m}m ago"`; under a day: `"{h}h ago"`; otherwise the
/// calendar date. Timestamps in the future read as `"0m ago"`.
pub fn relative_time_label(timestamp: Timestamp, now: Timestamp) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);
    let hours = minutes / 60;

    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
