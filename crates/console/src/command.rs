//! Parsing of console input lines into commands.

use std::path::PathBuf;

use auditguardian_screens::ViewMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterField {
    Severity,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Nav(String),
    Ask(String),
    UploadPolicy(PathBuf),
    Stage(PathBuf),
    Analyze,
    Filter { field: FilterField, value: String },
    /// List findings, optionally changing the status filter first.
    Findings(Option<String>),
    View(ViewMode),
    Export,
    Stats,
    History,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  nav <path>                 go to /, /policies, /transactions, /findings or /settings
  ask <question>             ask a question about the policy library
  upload-policy <path>       audit a .pdf or .docx policy document
  stage <path>               stage a .csv, .xls or .xlsx file for analysis
  analyze                    run a transaction analysis
  filter severity <value>    all, high, medium or low
  filter status <value>      all, new, reviewed or resolved
  findings [status]          list findings, optionally filtered by status
  view grid|list             findings layout
  export                     print the filtered anomalies as CSV
  stats                      headline numbers for the current screen
  history                    the Q&A transcript
  help                       this text
  quit                       leave";

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Free-text arguments (`ask`) are kept exactly as typed after the first
/// separating space.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (trimmed, ""),
    };
    let arg = rest.trim();

    let command = match verb.to_ascii_lowercase().as_str() {
        "nav" | "go" => Command::Nav(required(arg, "nav <path>")?.to_string()),
        "ask" => {
            required(arg, "ask <question>")?;
            Command::Ask(rest.to_string())
        }
        "upload-policy" => Command::UploadPolicy(required(arg, "upload-policy <path>")?.into()),
        "stage" => Command::Stage(required(arg, "stage <path>")?.into()),
        "analyze" => Command::Analyze,
        "filter" => parse_filter(arg)?,
        "findings" => Command::Findings((!arg.is_empty()).then(|| arg.to_string())),
        "view" => {
            let mode = ViewMode::parse(arg).ok_or(CommandError::Usage("view grid|list"))?;
            Command::View(mode)
        }
        "export" => Command::Export,
        "stats" => Command::Stats,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_filter(arg: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "filter severity|status <value>";
    let (field, value) = arg
        .split_once(char::is_whitespace)
        .ok_or(CommandError::Usage(USAGE))?;
    let field = match field.to_ascii_lowercase().as_str() {
        "severity" => FilterField::Severity,
        "status" => FilterField::Status,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(Command::Filter {
        field,
        value: value.trim().to_string(),
    })
}

fn required<'a>(arg: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(arg)
    }
}
