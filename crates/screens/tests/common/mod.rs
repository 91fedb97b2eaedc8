//! Shared helpers for screen controller integration tests.
//!
//! [`FakeGateway`] replays scripted replies in order. A reply can be held
//! back behind a gate so a test can observe the controller while the call
//! is in flight.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use auditguardian_core::audit::{AuditResult, AuditStatus, ChatResponse, SourceAttribution};
use auditguardian_events::{ActionPhase, Notification, UiEvent};
use auditguardian_gateway::{AuditGateway, GatewayError, UploadFile};
use tokio::sync::broadcast::Receiver;
use tokio::sync::Notify;

// ---------------------------------------------------------------------------
// Scripted replies
// ---------------------------------------------------------------------------

pub enum Outcome<T> {
    Ok(T),
    Api { status: u16, body: &'static str },
    Timeout(Duration),
}

pub struct Scripted<T> {
    outcome: Outcome<T>,
    started: Option<Arc<Notify>>,
    gate: Option<Arc<Notify>>,
}

impl<T> Scripted<T> {
    pub fn ok(value: T) -> Self {
        Self::from(Outcome::Ok(value))
    }

    pub fn api_error(status: u16, body: &'static str) -> Self {
        Self::from(Outcome::Api { status, body })
    }

    pub fn timeout() -> Self {
        Self::from(Outcome::Timeout(Duration::from_secs(30)))
    }

    /// Signal `started` when the call begins and wait for `gate` before
    /// replying.
    pub fn gated(mut self, started: Arc<Notify>, gate: Arc<Notify>) -> Self {
        self.started = Some(started);
        self.gate = Some(gate);
        self
    }

    async fn play(self) -> Result<T, GatewayError> {
        if let Some(started) = &self.started {
            started.notify_one();
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Api { status, body } => Err(GatewayError::Api {
                status,
                body: body.to_string(),
            }),
            Outcome::Timeout(after) => Err(GatewayError::Timeout(after)),
        }
    }
}

impl<T> From<Outcome<T>> for Scripted<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self {
            outcome,
            started: None,
            gate: None,
        }
    }
}

// ---------------------------------------------------------------------------
// FakeGateway
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeGateway {
    ask_script: Mutex<VecDeque<Scripted<ChatResponse>>>,
    upload_script: Mutex<VecDeque<Scripted<AuditResult>>>,
    questions: Mutex<Vec<String>>,
    uploads: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_ask(&self, reply: Scripted<ChatResponse>) -> &Self {
        self.ask_script.lock().unwrap().push_back(reply);
        self
    }

    pub fn script_upload(&self, reply: Scripted<AuditResult>) -> &Self {
        self.upload_script.lock().unwrap().push_back(reply);
        self
    }

    /// Questions received, in call order.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    /// Uploaded filenames, in call order.
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

impl AuditGateway for FakeGateway {
    async fn upload_file(&self, file: UploadFile) -> Result<AuditResult, GatewayError> {
        self.uploads.lock().unwrap().push(file.filename.clone());
        let reply = self.upload_script.lock().unwrap().pop_front();
        reply.expect("unscripted upload_file call").play().await
    }

    async fn ask_question(&self, question: &str) -> Result<ChatResponse, GatewayError> {
        self.questions.lock().unwrap().push(question.to_string());
        let reply = self.ask_script.lock().unwrap().pop_front();
        reply.expect("unscripted ask_question call").play().await
    }
}

// ---------------------------------------------------------------------------
// Sample payloads
// ---------------------------------------------------------------------------

pub fn policy_audit() -> AuditResult {
    AuditResult {
        filename: "policy.pdf".to_string(),
        score: 82.0,
        status: AuditStatus::Passed,
        summary: "The policy covers approval thresholds and escalation paths.".to_string(),
        risks: vec!["r1".to_string()],
        recommendations: vec!["rec1".to_string()],
    }
}

pub fn travel_answer(question: &str) -> ChatResponse {
    ChatResponse {
        question: question.to_string(),
        answer: "$5000".to_string(),
        sources: Some(SourceAttribution {
            filename: "travel.pdf".to_string(),
            score: 90.0,
            status: AuditStatus::Passed,
        }),
    }
}

pub fn pdf(name: &str) -> UploadFile {
    UploadFile::new(name, b"%PDF-1.7 test document".to_vec())
}

// ---------------------------------------------------------------------------
// Event helpers
// ---------------------------------------------------------------------------

/// Everything published so far.
pub fn drain(rx: &mut Receiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn notifications(events: &[UiEvent]) -> Vec<Notification> {
    events
        .iter()
        .filter_map(UiEvent::as_notification)
        .cloned()
        .collect()
}

/// Phase sequence of one screen action.
pub fn phases(events: &[UiEvent], screen: &str, action: &str) -> Vec<ActionPhase> {
    events
        .iter()
        .filter_map(UiEvent::as_action)
        .filter(|a| a.is_for(screen, action))
        .map(|a| a.phase)
        .collect()
}
