//! Static reference datasets.
//!
//! These stand in for the persisted application state the screens would
//! read from a store. Every call returns a fresh copy; screens mutate
//! their own copies and never write back.

use chrono::{DateTime, NaiveDate, Utc};

use crate::activity::{Activity, ActivityType, DashboardStats, FindingsBySeverity};
use crate::finding::{Finding, FindingStatus};
use crate::policy::{DocumentType, Policy, PolicyStatus};
use crate::qa::QaHistoryEntry;
use crate::transaction::{IssueType, Severity, Transaction, TransactionStatus};
use crate::types::{Date, Timestamp};

fn date(raw: &str) -> Date {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_default()
}

fn timestamp(raw: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Policy documents available to the navigator.
pub fn policies() -> Vec<Policy> {
    [
        ("1", "Travel & Expense Policy", "pdf", "Financial", 45, "2024-01-15", "active"),
        ("2", "Procurement Guidelines", "docx", "Financial", 32, "2024-01-10", "active"),
        ("3", "IT Security Policy", "pdf", "IT Security", 78, "2024-01-08", "active"),
        ("4", "Employee Handbook", "pdf", "HR", 120, "2024-01-05", "active"),
        ("5", "Data Retention Guidelines", "docx", "Compliance", 28, "2024-01-03", "active"),
        ("6", "Vendor Management Policy", "pdf", "Financial", 35, "2024-01-01", "active"),
    ]
    .into_iter()
    .map(|(id, name, document_type, category, pages, uploaded_at, status)| Policy {
        id: id.to_string(),
        name: name.to_string(),
        document_type: DocumentType::from(document_type),
        category: category.to_string(),
        pages,
        uploaded_at: date(uploaded_at),
        status: PolicyStatus::from(status),
    })
    .collect()
}

/// Transactions, with the anomalies the detector flagged.
pub fn transactions() -> Vec<Transaction> {
    [
        ("TXN-001", "2024-01-20", "Office Supplies Co.", 2450.0, "Marketing", "Office supplies Q1", None, None, "clean"),
        ("TXN-002", "2024-01-19", "TechPro Solutions", 15750.0, "IT", "Software licenses", Some("Policy Violation"), Some("high"), "new"),
        ("TXN-003", "2024-01-18", "Global Travel Inc.", 8900.0, "Sales", "Travel expenses - client meeting", Some("Pattern Alert"), Some("medium"), "reviewed"),
        ("TXN-004", "2024-01-17", "Marketing Masters LLC", 45000.0, "Marketing", "Q1 campaign services", Some("Semantic Anomaly"), Some("high"), "new"),
        ("TXN-005", "2024-01-16", "Cloud Services Pro", 3200.0, "IT", "Monthly cloud hosting", None, None, "clean"),
        ("TXN-006", "2024-01-15", "Premium Catering", 1850.0, "HR", "Team building event", Some("Policy Violation"), Some("low"), "resolved"),
        ("TXN-007", "2024-01-14", "Strategic Consulting", 75000.0, "Executive", "Strategy consultation", Some("Pattern Alert"), Some("high"), "new"),
        ("TXN-008", "2024-01-13", "Office Furniture Plus", 12500.0, "Operations", "New workstations", None, None, "clean"),
        ("TXN-009", "2024-01-12", "DataSecure Ltd.", 28000.0, "IT", "Security audit services", Some("Semantic Anomaly"), Some("medium"), "reviewed"),
        ("TXN-010", "2024-01-11", "Express Logistics", 4500.0, "Operations", "Shipping services", None, None, "clean"),
        ("TXN-011", "2024-01-10", "TechPro Solutions", 18500.0, "IT", "Hardware procurement", Some("Policy Violation"), Some("medium"), "new"),
        ("TXN-012", "2024-01-09", "Elite Training Co.", 9800.0, "HR", "Leadership training", None, None, "clean"),
        ("TXN-013", "2024-01-08", "Global Travel Inc.", 12400.0, "Sales", "International conference", Some("Pattern Alert"), Some("medium"), "new"),
        ("TXN-014", "2024-01-07", "Print Solutions", 3800.0, "Marketing", "Marketing materials", None, None, "clean"),
        ("TXN-015", "2024-01-06", "Unknown Vendor XYZ", 55000.0, "Executive", "Consulting services", Some("Semantic Anomaly"), Some("high"), "new"),
        ("TXN-016", "2024-01-05", "Legal Associates", 22000.0, "Legal", "Legal consultation", None, None, "clean"),
        ("TXN-017", "2024-01-04", "Tech Hardware Inc.", 8900.0, "IT", "Server equipment", None, None, "clean"),
        ("TXN-018", "2024-01-03", "Luxury Hotels Group", 6500.0, "Sales", "Client entertainment", Some("Policy Violation"), Some("medium"), "reviewed"),
        ("TXN-019", "2024-01-02", "Software Giants LLC", 95000.0, "IT", "Enterprise software", Some("Pattern Alert"), Some("high"), "new"),
        ("TXN-020", "2024-01-01", "Cleaning Services Pro", 2100.0, "Operations", "Facility cleaning", None, None, "clean"),
    ]
    .into_iter()
    .map(
        |(id, day, vendor, amount, department, description, issue_type, severity, status)| {
            Transaction {
                id: id.to_string(),
                date: date(day),
                vendor: vendor.to_string(),
                amount,
                department: department.to_string(),
                description: description.to_string(),
                issue_type: issue_type.map(IssueType::from),
                severity: severity.map(Severity::from),
                status: TransactionStatus::from(status),
            }
        },
    )
    .collect()
}

/// Findings generated from the flagged transactions.
pub fn findings() -> Vec<Finding> {
    vec![
        Finding {
            id: "FND-001".to_string(),
            title: "Unapproved Vendor Payment Exceeding Threshold".to_string(),
            severity: Severity::High,
            status: FindingStatus::Draft,
            created_at: date("2024-01-20"),
            condition: "A payment of $75,000 was made to Strategic Consulting without proper procurement approval for amounts exceeding $50,000.".to_string(),
            criteria: "Per Procurement Guidelines Section 4.2, all vendor payments exceeding $50,000 require CFO approval and competitive bidding process.".to_string(),
            cause: "The requesting department bypassed the standard procurement process citing urgency. No competitive bids were obtained.".to_string(),
            effect: "Risk of overpayment and non-compliance with procurement policies. Potential financial loss estimated at $15,000-25,000.".to_string(),
            related_transactions: strings(&["TXN-007"]),
            related_policy: "Procurement Guidelines".to_string(),
        },
        Finding {
            id: "FND-002".to_string(),
            title: "Excessive Travel Expenses Without Pre-Approval".to_string(),
            severity: Severity::Medium,
            status: FindingStatus::UnderReview,
            created_at: date("2024-01-19"),
            condition: "Multiple travel expenses totaling $21,300 were incurred without obtaining required pre-approval for international travel.".to_string(),
            criteria: "Travel & Expense Policy Section 2.1 requires pre-approval for all international travel and expenses exceeding $5,000.".to_string(),
            cause: "Sales team booked travel independently without using the corporate travel portal or obtaining management approval.".to_string(),
            effect: "Policy non-compliance and potential for unnecessary travel expenses. Identified savings opportunity of $4,000.".to_string(),
            related_transactions: strings(&["TXN-003", "TXN-013"]),
            related_policy: "Travel & Expense Policy".to_string(),
        },
        Finding {
            id: "FND-003".to_string(),
            title: "Unknown Vendor Payment - Due Diligence Gap".to_string(),
            severity: Severity::High,
            status: FindingStatus::Draft,
            created_at: date("2024-01-18"),
            condition: "A $55,000 payment was made to \"Unknown Vendor XYZ\" which is not registered in the approved vendor database.".to_string(),
            criteria: "Vendor Management Policy Section 3.1 requires all vendors to complete due diligence before any payments are processed.".to_string(),
            cause: "Vendor was added as an exception without completing the standard vendor onboarding process.".to_string(),
            effect: "Risk of fraud, money laundering, or payment to non-compliant vendors. Regulatory exposure.".to_string(),
            related_transactions: strings(&["TXN-015"]),
            related_policy: "Vendor Management Policy".to_string(),
        },
        Finding {
            id: "FND-004".to_string(),
            title: "Software License Overspend".to_string(),
            severity: Severity::Medium,
            status: FindingStatus::Approved,
            created_at: date("2024-01-17"),
            condition: "IT department purchased $15,750 in software licenses without checking existing license inventory.".to_string(),
            criteria: "IT Security Policy Section 5.3 requires license inventory review before new software purchases.".to_string(),
            cause: "Lack of centralized license management system and communication gap between IT teams.".to_string(),
            effect: "Duplicate license costs estimated at $8,000. Opportunity for license consolidation.".to_string(),
            related_transactions: strings(&["TXN-002"]),
            related_policy: "IT Security Policy".to_string(),
        },
        Finding {
            id: "FND-005".to_string(),
            title: "Unusual Payment Pattern - Consulting Services".to_string(),
            severity: Severity::Low,
            status: FindingStatus::UnderReview,
            created_at: date("2024-01-16"),
            condition: "Marketing department shows 45% increase in consulting payments compared to prior quarter.".to_string(),
            criteria: "Internal benchmarking indicates significant deviation from historical spending patterns.".to_string(),
            cause: "Q1 campaign launch required additional external support. Budget was pre-approved but execution timing was concentrated.".to_string(),
            effect: "No immediate compliance concern, but recommend spreading payments across quarters for better cash flow management.".to_string(),
            related_transactions: strings(&["TXN-004"]),
            related_policy: "Procurement Guidelines".to_string(),
        },
        Finding {
            id: "FND-006".to_string(),
            title: "Enterprise Software Purchase - Competitive Bid Bypass".to_string(),
            severity: Severity::High,
            status: FindingStatus::Draft,
            created_at: date("2024-01-15"),
            condition: "A $95,000 enterprise software purchase was made without competitive bidding as required for purchases over $25,000.".to_string(),
            criteria: "Procurement Guidelines Section 4.1 mandates competitive bidding for all purchases exceeding $25,000.".to_string(),
            cause: "Vendor claimed sole-source status, but no formal sole-source justification was documented.".to_string(),
            effect: "Potential overpayment risk. Industry benchmarking suggests 15-20% savings achievable through competitive process.".to_string(),
            related_transactions: strings(&["TXN-019"]),
            related_policy: "Procurement Guidelines".to_string(),
        },
        Finding {
            id: "FND-007".to_string(),
            title: "Client Entertainment Limit Exceeded".to_string(),
            severity: Severity::Low,
            status: FindingStatus::Resolved,
            created_at: date("2024-01-14"),
            condition: "Client entertainment expense of $6,500 exceeded the $5,000 per-event limit.".to_string(),
            criteria: "Travel & Expense Policy Section 3.4 limits client entertainment to $5,000 per event without VP approval.".to_string(),
            cause: "Sales representative was unaware of the updated policy limit effective January 2024.".to_string(),
            effect: "Minor policy violation. Training recommendation issued. No financial impact.".to_string(),
            related_transactions: strings(&["TXN-018"]),
            related_policy: "Travel & Expense Policy".to_string(),
        },
        Finding {
            id: "FND-008".to_string(),
            title: "Security Audit Vendor - Contract Review Required".to_string(),
            severity: Severity::Medium,
            status: FindingStatus::Draft,
            created_at: date("2024-01-13"),
            condition: "Security audit services of $28,000 were procured from a vendor with an expired master service agreement.".to_string(),
            criteria: "Vendor Management Policy Section 2.2 requires valid contracts before service delivery.".to_string(),
            cause: "Contract renewal was pending legal review when services were urgently needed.".to_string(),
            effect: "Limited recourse in case of service disputes. Recommend expedited contract renewal.".to_string(),
            related_transactions: strings(&["TXN-009"]),
            related_policy: "Vendor Management Policy".to_string(),
        },
    ]
}

/// Earlier question/answer exchanges, newest first.
pub fn qa_history() -> Vec<QaHistoryEntry> {
    [
        (
            "qa-1",
            "What is the approval threshold for travel expenses?",
            "According to the Travel & Expense Policy (Section 2.1), travel expenses exceeding $5,000 require pre-approval from the department manager. International travel requires additional approval from the VP level regardless of amount.",
            "Travel & Expense Policy",
            12,
            0.95,
            "2024-01-20T10:30:00Z",
        ),
        (
            "qa-2",
            "How long should we retain financial records?",
            "The Data Retention Guidelines (Section 3.2) specify that financial records must be retained for a minimum of 7 years from the date of creation. Tax-related documents should be retained for 10 years.",
            "Data Retention Guidelines",
            8,
            0.92,
            "2024-01-20T09:15:00Z",
        ),
        (
            "qa-3",
            "What is the competitive bidding threshold for procurement?",
            "Per Procurement Guidelines (Section 4.1), competitive bidding is required for all purchases exceeding $25,000. At least three qualified vendors must be invited to bid. Sole-source exceptions require documented justification and CFO approval.",
            "Procurement Guidelines",
            15,
            0.98,
            "2024-01-19T14:45:00Z",
        ),
    ]
    .into_iter()
    .map(|(id, question, answer, source, page, confidence, at)| QaHistoryEntry {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        source: source.to_string(),
        page: Some(page),
        confidence: Some(confidence),
        created_at: timestamp(at),
        feedback: None,
    })
    .collect()
}

/// Recent activity feed, newest first.
pub fn recent_activity() -> Vec<Activity> {
    [
        ("act-1", "upload", "Travel & Expense Policy uploaded", "2024-01-20T11:30:00Z", "John Smith"),
        ("act-2", "finding", "New finding: Unapproved Vendor Payment", "2024-01-20T10:45:00Z", "Sarah Johnson"),
        ("act-3", "analysis", "Transaction analysis completed - 8 anomalies detected", "2024-01-20T09:30:00Z", "System"),
        ("act-4", "question", "Policy question answered: Travel approval threshold", "2024-01-20T09:15:00Z", "Mike Chen"),
        ("act-5", "finding", "Finding approved: Software License Overspend", "2024-01-19T16:00:00Z", "Lisa Wang"),
        ("act-6", "upload", "Q1 Transactions imported (250 records)", "2024-01-19T14:30:00Z", "John Smith"),
    ]
    .into_iter()
    .map(|(id, kind, description, at, user)| Activity {
        id: id.to_string(),
        activity_type: ActivityType::from(kind),
        description: description.to_string(),
        timestamp: timestamp(at),
        user: user.to_string(),
    })
    .collect()
}

/// Headline numbers for the dashboard cards.
pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_policies: 6,
        active_transactions: 250,
        findings_generated: 8,
        findings_by_severity: FindingsBySeverity {
            high: 4,
            medium: 3,
            low: 1,
        },
    }
}
