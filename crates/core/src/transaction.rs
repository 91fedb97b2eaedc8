//! Transactions, anomaly filtering and CSV export for the transaction
//! sentinel.

use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::types::Date;

crate::open_enum! {
    pub enum Severity {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

crate::open_enum! {
    /// Kind of anomaly the detector attached to a transaction.
    pub enum IssueType {
        PolicyViolation => "Policy Violation",
        PatternAlert => "Pattern Alert",
        SemanticAnomaly => "Semantic Anomaly",
    }
}

crate::open_enum! {
    /// Review state of a transaction.
    pub enum TransactionStatus {
        /// No anomaly attached.
        Clean => "clean",
        New => "new",
        Reviewed => "reviewed",
        Resolved => "resolved",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: Date,
    pub vendor: String,
    pub amount: f64,
    pub department: String,
    pub description: String,
    pub issue_type: Option<IssueType>,
    /// Present exactly when `issue_type` is present.
    pub severity: Option<Severity>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// A transaction is an anomaly when the detector attached an issue.
    pub fn is_anomaly(&self) -> bool {
        self.issue_type.is_some()
    }
}

/// Severity and status filter applied to the anomaly table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnomalyFilter {
    pub severity: Filter<Severity>,
    pub status: Filter<TransactionStatus>,
}

impl AnomalyFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.is_anomaly()
            && self.severity.matches_opt(transaction.severity.as_ref())
            && self.status.matches(&transaction.status)
    }

    /// Apply the filter. Pure: the same input always yields the same
    /// output and only anomalies are ever returned.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

/// All anomalies in a transaction list, unfiltered.
pub fn anomalies(transactions: &[Transaction]) -> Vec<&Transaction> {
    AnomalyFilter::default().apply(transactions)
}

/// Summary counters for the sentinel header cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnomalyStats {
    pub transactions_scanned: usize,
    pub anomalies: usize,
    pub high_severity: usize,
    pub resolved: usize,
}

impl AnomalyStats {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let anomalies = anomalies(transactions);
        Self {
            transactions_scanned: transactions.len(),
            anomalies: anomalies.len(),
            high_severity: anomalies
                .iter()
                .filter(|t| t.severity == Some(Severity::High))
                .count(),
            resolved: anomalies
                .iter()
                .filter(|t| t.status == TransactionStatus::Resolved)
                .count(),
        }
    }
}

const CSV_HEADER: &str = "id,date,vendor,amount,department,description,issue_type,severity,status";

/// Render transactions as CSV (header row, `\n` line endings, RFC 4180
/// quoting for fields containing commas, quotes or newlines).
pub fn export_csv(transactions: &[&Transaction]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + transactions.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for t in transactions {
        let fields = [
            csv_field(&t.id),
            csv_field(&t.date.format("%Y-%m-%d").to_string()),
            csv_field(&t.vendor),
            format!("{:.2}", t.amount),
            csv_field(&t.department),
            csv_field(&t.description),
            csv_field(t.issue_type.as_ref().map(|i| i.as_str()).unwrap_or("")),
            csv_field(t.severity.as_ref().map(|s| s.as_str()).unwrap_or("")),
            csv_field(t.status.as_str()),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
