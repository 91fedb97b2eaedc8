//! `auditguardian` -- terminal front end for the audit backend.
//!
//! Reads one command per line from stdin, drives the screen controllers
//! and prints notifications as they arrive. Type `help` for commands.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default                 | Description                   |
//! |--------------------------|----------|-------------------------|-------------------------------|
//! | `AUDIT_API_BASE_URL`     | no       | `http://127.0.0.1:8000` | Audit backend base URL        |
//! | `AUDIT_API_TIMEOUT_SECS` | no       | `30`                    | Per-request timeout, seconds  |
//! | `RUST_LOG`               | no       | see below               | Log filter (logs go to stderr) |

use std::sync::Arc;

use anyhow::Context;
use auditguardian_console::app::{App, Flow};
use auditguardian_console::{command, notifications};
use auditguardian_events::EventBus;
use auditguardian_gateway::{AuditApi, AuditGateway, GatewayConfig, GatewayError};
use auditguardian_screens::ScreenError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "auditguardian_console=info,auditguardian_gateway=info,auditguardian_screens=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = GatewayConfig::from_env().context("Invalid backend configuration")?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting auditguardian console",
    );

    let api = Arc::new(AuditApi::new(&config)?);
    let bus = Arc::new(EventBus::default());
    let printer = tokio::spawn(notifications::forward(bus.subscribe(), std::io::stdout()));

    let mut app = App::new(api, bus);
    let outcome = run(&mut app).await;

    // The app holds the last bus handles; dropping it closes the channel
    // and lets the printer finish the toasts still buffered.
    drop(app);
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "Notification printer stopped abnormally");
    }

    tracing::info!("Console closed");
    outcome
}

async fn run<G: AuditGateway>(app: &mut App<G>) -> anyhow::Result<()> {
    println!("{}\n", app.render().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match app.execute(command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue(output)) if output.is_empty() => {}
            Ok(Flow::Continue(output)) => println!("{output}"),
            Err(ScreenError::Gateway(GatewayError::Io(e))) => println!("Could not read file: {e}"),
            Err(ScreenError::Gateway(e @ GatewayError::Rejected(_))) => println!("{e}"),
            // Backend failures were already announced as a notification.
            Err(ScreenError::Gateway(e)) => tracing::debug!(error = %e, "Command failed"),
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}
