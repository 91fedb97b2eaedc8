//! Integration tests for the transaction sentinel controller.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use auditguardian_core::audit::AuditStatus;
use auditguardian_core::fixtures;
use auditguardian_core::transaction::anomalies;
use auditguardian_events::{ActionPhase, EventBus};
use auditguardian_gateway::UploadFile;
use auditguardian_screens::transaction_sentinel::{ANALYZE_ACTION, SCREEN};
use auditguardian_screens::{AnalysisOutcome, ScreenError, TransactionSentinel, UploadSource};
use tokio::sync::Notify;

use common::*;

fn sentinel(gateway: FakeGateway) -> (TransactionSentinel<FakeGateway>, Arc<FakeGateway>, Arc<EventBus>) {
    let gateway = Arc::new(gateway);
    let bus = Arc::new(EventBus::default());
    (TransactionSentinel::new(gateway.clone(), bus.clone()), gateway, bus)
}

fn ledger() -> UploadFile {
    UploadFile::new("q1-ledger.csv", b"id,amount\nTXN-1,100.00\n".to_vec())
}

// ---------------------------------------------------------------------------
// Test: every filter combination is a pure subset of the anomaly set
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filters_are_idempotent_subsets() {
    let (sentinel, _, _) = sentinel(FakeGateway::new());
    let transactions = fixtures::transactions();
    let all_ids: Vec<String> = anomalies(&transactions).into_iter().map(|t| t.id.clone()).collect();

    for severity in ["all", "high", "medium", "low"] {
        for status in ["all", "new", "reviewed", "resolved"] {
            sentinel.set_severity_filter(severity).await;
            sentinel.set_status_filter(status).await;
            let first = sentinel.visible_anomalies().await;

            sentinel.set_severity_filter(severity).await;
            sentinel.set_status_filter(status).await;
            let second = sentinel.visible_anomalies().await;

            assert_eq!(first, second, "{severity}/{status}");
            assert!(
                first.iter().all(|t| all_ids.contains(&t.id)),
                "{severity}/{status} escaped the anomaly set"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Test: staged file goes through the gateway
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_staged_file_through_gateway() {
    let mut audit = policy_audit();
    audit.filename = "q1-ledger.csv".to_string();
    audit.status = AuditStatus::Other("REVIEW".to_string());
    let gateway = FakeGateway::new();
    gateway.script_upload(Scripted::ok(audit.clone()));
    let (sentinel, gateway, bus) = sentinel(gateway);
    let mut rx = bus.subscribe();

    sentinel.open_upload().await;
    sentinel.stage_file(ledger(), UploadSource::DragDrop).await.unwrap();
    assert_eq!(sentinel.staged_filename().await.as_deref(), Some("q1-ledger.csv"));
    assert!(!sentinel.upload_modal().await.open);

    let outcome = sentinel.analyze().await.unwrap();
    assert_eq!(outcome, AnalysisOutcome::Audited(audit));
    assert_eq!(gateway.uploads(), vec!["q1-ledger.csv"]);
    assert!(sentinel.staged_filename().await.is_none());
    assert_eq!(sentinel.last_analysis().await, Some(outcome));

    let events = drain(&mut rx);
    assert_eq!(
        phases(&events, SCREEN, ANALYZE_ACTION),
        vec![ActionPhase::Pending, ActionPhase::Succeeded, ActionPhase::Idle]
    );
}

#[tokio::test]
async fn failed_analysis_keeps_staged_file() {
    let gateway = FakeGateway::new();
    gateway.script_upload(Scripted::api_error(500, "Internal Server Error"));
    let (sentinel, _, bus) = sentinel(gateway);

    sentinel.stage_file(ledger(), UploadSource::Browse).await.unwrap();
    let mut rx = bus.subscribe();

    let err = sentinel.analyze().await.unwrap_err();
    assert_matches!(err, ScreenError::Gateway(_));
    assert_eq!(sentinel.staged_filename().await.as_deref(), Some("q1-ledger.csv"));
    assert!(!sentinel.has_analyzed().await);
    assert_eq!(sentinel.analyze_phase(), ActionPhase::Idle);

    let events = drain(&mut rx);
    let toasts = notifications(&events);
    assert_eq!(toasts.len(), 1);
    assert!(toasts[0].is_error());
}

#[tokio::test]
async fn staging_during_analysis_is_refused() {
    let started = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let gateway = FakeGateway::new();
    gateway.script_upload(Scripted::ok(policy_audit()).gated(started.clone(), gate.clone()));
    let (sentinel, gateway, _) = sentinel(gateway);
    let sentinel = Arc::new(sentinel);

    sentinel.stage_file(ledger(), UploadSource::Browse).await.unwrap();
    let run = tokio::spawn({
        let sentinel = sentinel.clone();
        async move { sentinel.analyze().await }
    });
    started.notified().await;

    let late = UploadFile::new("q2-ledger.csv", b"id,amount\n".to_vec());
    let err = sentinel.stage_file(late, UploadSource::DragDrop).await.unwrap_err();
    assert_matches!(err, ScreenError::Busy { action: ANALYZE_ACTION, .. });

    gate.notify_one();
    run.await.unwrap().unwrap();
    assert_eq!(gateway.uploads(), vec!["q1-ledger.csv"]);
    assert!(sentinel.staged_filename().await.is_none());
}

// ---------------------------------------------------------------------------
// Test: a file staged next to a starting analysis is never lost
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn file_staged_beside_analysis_is_uploaded_or_kept() {
    for round in 0..200 {
        let gateway = FakeGateway::new();
        gateway.script_upload(Scripted::ok(policy_audit()));
        let (sentinel, gateway, _) = sentinel(gateway);
        let sentinel = Arc::new(sentinel);
        sentinel.stage_file(ledger(), UploadSource::Browse).await.unwrap();

        let analyze = tokio::spawn({
            let sentinel = sentinel.clone();
            async move { sentinel.analyze().await }
        });
        let stage = tokio::spawn({
            let sentinel = sentinel.clone();
            async move {
                let late = UploadFile::new("q2-ledger.csv", b"id,amount\n".to_vec());
                sentinel.stage_file(late, UploadSource::DragDrop).await
            }
        });
        analyze.await.unwrap().unwrap();
        let staged_late = stage.await.unwrap().is_ok();

        if staged_late {
            let uploaded = gateway.uploads() == vec!["q2-ledger.csv"];
            let kept = sentinel.staged_filename().await.as_deref() == Some("q2-ledger.csv");
            assert!(uploaded || kept, "round {round}: staged file vanished");
        } else {
            assert_eq!(gateway.uploads(), vec!["q1-ledger.csv"], "round {round}");
        }
    }
}

#[tokio::test]
async fn oversized_file_is_not_staged() {
    let (sentinel, gateway, _) = sentinel(FakeGateway::new());
    let huge = UploadFile::new("big.xlsx", vec![0u8; 50 * 1024 * 1024 + 1]);

    let err = sentinel.stage_file(huge, UploadSource::Browse).await.unwrap_err();
    assert_matches!(err, ScreenError::Core(_));
    assert!(sentinel.staged_filename().await.is_none());
    assert!(gateway.uploads().is_empty());
}

// ---------------------------------------------------------------------------
// Test: header stats ignore filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stats_cover_full_data_set() {
    let (sentinel, _, _) = sentinel(FakeGateway::new());
    sentinel.set_severity_filter("low").await;

    let stats = sentinel.stats();
    assert_eq!(stats.transactions_scanned, 20);
    assert_eq!(stats.anomalies, 11);
    assert_eq!(stats.high_severity, 5);
    assert_eq!(stats.resolved, 1);
}
