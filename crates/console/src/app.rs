//! Wires every screen controller together and executes console commands
//! against them. Output is returned as text so the loop in `main` stays
//! trivial.

use std::fmt::Write as _;
use std::sync::Arc;

use auditguardian_events::EventBus;
use auditguardian_gateway::{AuditGateway, UploadFile};
use auditguardian_screens::{
    AnalysisOutcome, AutoReporter, Dashboard, PolicyNavigator, Screen, ScreenResult, Settings,
    Shell, TransactionSentinel, UploadSource, ViewMode,
};
use chrono::{Local, Timelike, Utc};

use crate::command::{Command, FilterField, HELP};

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct App<G> {
    shell: Shell,
    dashboard: Dashboard,
    navigator: PolicyNavigator<G>,
    sentinel: TransactionSentinel<G>,
    reporter: AutoReporter,
    settings: Settings,
}

impl<G: AuditGateway> App<G> {
    pub fn new(gateway: Arc<G>, bus: Arc<EventBus>) -> Self {
        Self {
            shell: Shell::new(),
            dashboard: Dashboard::new(),
            navigator: PolicyNavigator::new(gateway.clone(), bus.clone()),
            sentinel: TransactionSentinel::new(gateway, bus.clone()),
            reporter: AutoReporter::new(bus),
            settings: Settings::new(),
        }
    }

    pub fn active_screen(&self) -> Screen {
        self.shell.active()
    }

    pub async fn execute(&mut self, command: Command) -> ScreenResult<Flow> {
        let output = match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => HELP.to_string(),
            Command::Nav(path) => {
                self.shell.navigate(&path)?;
                self.render().await
            }
            Command::Ask(question) => match self.navigator.ask(question).await? {
                Some(entry) => format!("A: {}\n   (source: {})", entry.answer, entry.source),
                None => String::new(),
            },
            Command::UploadPolicy(path) => {
                let file = UploadFile::from_path(&path).await?;
                let result = self.navigator.upload_policy(file, UploadSource::Browse).await?;
                let mut out = format!(
                    "{} | status {} | score {}\n{}",
                    result.filename, result.status, result.score, result.summary
                );
                list_section(&mut out, "Risks", &result.risks);
                list_section(&mut out, "Recommendations", &result.recommendations);
                out
            }
            Command::Stage(path) => {
                let file = UploadFile::from_path(&path).await?;
                self.sentinel.stage_file(file, UploadSource::Browse).await?;
                String::new()
            }
            Command::Analyze => match self.sentinel.analyze().await? {
                AnalysisOutcome::Audited(result) => format!(
                    "{} | status {} | score {}\n{}",
                    result.filename, result.status, result.score, result.summary
                ),
                AnalysisOutcome::Rescanned(stats) => format!(
                    "{} anomalies in {} transactions ({} high severity)",
                    stats.anomalies, stats.transactions_scanned, stats.high_severity
                ),
            },
            Command::Filter { field, value } => {
                match field {
                    FilterField::Severity => self.sentinel.set_severity_filter(&value).await,
                    FilterField::Status => self.sentinel.set_status_filter(&value).await,
                }
                self.render_anomalies().await
            }
            Command::Findings(status) => {
                if let Some(status) = status {
                    self.reporter.set_status_filter(&status);
                }
                self.render_findings()
            }
            Command::View(mode) => {
                self.reporter.set_view_mode(mode);
                self.render_findings()
            }
            Command::Export => self.sentinel.export_csv().await,
            Command::Stats => self.render_stats(),
            Command::History => self.render_history().await,
        };
        Ok(Flow::Continue(output))
    }

    /// Text view of the active screen.
    pub async fn render(&self) -> String {
        let screen = self.shell.active();
        let body = match screen {
            Screen::Dashboard => self.render_dashboard(),
            Screen::PolicyNavigator => {
                let mut out = String::new();
                for policy in self.navigator.visible_policies().await {
                    let _ = writeln!(
                        out,
                        "{:<4} {:<30} {:<12} {:>4} pages",
                        policy.id, policy.name, policy.category, policy.pages
                    );
                }
                out
            }
            Screen::TransactionSentinel => self.render_anomalies().await,
            Screen::AutoReporter => self.render_findings(),
            Screen::Settings => {
                let mut out = String::new();
                for section in auditguardian_screens::SettingsSection::ALL {
                    let marker = if section == self.settings.active_section() { '>' } else { ' ' };
                    let _ = writeln!(out, "{marker} {}", section.title());
                }
                let _ = write!(out, "API key: {}", self.settings.api_key_display());
                out
            }
        };
        format!("== {} ==\n{}", screen.title(), body.trim_end())
    }

    fn render_dashboard(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}!", self.dashboard.greeting(Local::now().hour()));
        out.push_str(&self.render_stats());
        out.push_str("\nRecent activity:\n");
        for item in self.dashboard.activity_feed(Utc::now()) {
            let _ = writeln!(out, "  {:<10} {} ({}, {})", item.activity_type, item.description, item.user, item.when);
        }
        out
    }

    fn render_stats(&self) -> String {
        match self.shell.active() {
            Screen::TransactionSentinel => {
                let s = self.sentinel.stats();
                format!(
                    "Scanned {} | Anomalies {} | High severity {} | Resolved {}",
                    s.transactions_scanned, s.anomalies, s.high_severity, s.resolved
                )
            }
            Screen::AutoReporter => {
                let s = self.reporter.stats();
                format!(
                    "Draft {} | Under review {} | Approved {}",
                    s.draft, s.under_review, s.approved
                )
            }
            _ => {
                let s = self.dashboard.stats();
                let slices = self
                    .dashboard
                    .severity_slices()
                    .iter()
                    .map(|slice| format!("{} {}", slice.label, slice.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Policies {} | Transactions analyzed {} | Findings {} ({slices})",
                    s.total_policies, s.active_transactions, s.findings_generated
                )
            }
        }
    }

    async fn render_anomalies(&self) -> String {
        let mut out = String::new();
        for t in self.sentinel.visible_anomalies().await {
            let _ = writeln!(
                out,
                "{:<8} {} {:<24} {:>12.2} {:<8} {:<8} {}",
                t.id,
                t.date,
                t.vendor,
                t.amount,
                t.severity.as_ref().map(|s| s.as_str()).unwrap_or("-"),
                t.status,
                t.issue_type.as_ref().map(|i| i.as_str()).unwrap_or(""),
            );
        }
        if out.is_empty() {
            out.push_str("No anomalies match the current filters.");
        }
        out
    }

    fn render_findings(&self) -> String {
        let mut out = String::new();
        for f in self.reporter.visible() {
            match self.reporter.view_mode() {
                ViewMode::List => {
                    let _ = writeln!(out, "{} [{}] [{}] {}", f.id, f.severity, f.status, f.title);
                }
                ViewMode::Grid => {
                    let _ = writeln!(out, "+ {} ({} / {})\n|   {}", f.id, f.severity, f.status, f.title);
                }
            }
        }
        if out.is_empty() {
            out.push_str("No findings match the current filter.");
        }
        out
    }

    async fn render_history(&self) -> String {
        let mut out = String::new();
        for entry in self.navigator.history().await {
            let confidence = entry
                .confidence_percent()
                .map(|c| format!(", {c}% confidence"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "Q: {}\nA: {}\n   ({}{})",
                entry.question, entry.answer, entry.source, confidence
            );
        }
        out
    }
}

fn list_section(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(out, "\n{title}:");
    for item in items {
        let _ = write!(out, "\n  - {item}");
    }
}
