use std::time::Duration;

use auditguardian_core::error::CoreError;

/// Errors from the audit backend gateway.
///
/// Screens treat every variant as one opaque failure; the variants exist
/// for logging and for callers that want to report timeouts differently.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (connection refused, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// No response arrived within the configured request timeout.
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The backend returned a non-2xx status code.
    #[error("Audit API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading a local file for upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A local file was refused before any of it was read or sent.
    #[error("File rejected: {0}")]
    Rejected(#[from] CoreError),

    /// The gateway configuration is unusable.
    #[error("Invalid gateway configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Classify a transport error, separating timeouts from the rest.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Request(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
