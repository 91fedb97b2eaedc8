//! REST client for the audit backend.
//!
//! Wraps the two backend endpoints (file audit, document Q&A) using
//! [`reqwest`]. The client keeps no state between calls, so one
//! [`AuditApi`] can serve any number of concurrent requests.

use std::future::Future;
use std::time::Duration;

use auditguardian_core::audit::{AuditResult, ChatResponse};
use reqwest::multipart::{Form, Part};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::file::UploadFile;

/// Path of the upload-and-audit endpoint.
pub const AUDIT_FILE_PATH: &str = "/audit-file/";

/// Path of the question-answering endpoint.
pub const ASK_PATH: &str = "/ask/";

/// Multipart field the backend reads the uploaded file from.
pub const FILE_FIELD: &str = "file";

/// The two operations the screens need from the backend.
///
/// [`AuditApi`] is the HTTP implementation; tests substitute in-memory
/// fakes.
pub trait AuditGateway: Send + Sync {
    /// Submit a file for audit and wait for the result.
    fn upload_file(
        &self,
        file: UploadFile,
    ) -> impl Future<Output = Result<AuditResult, GatewayError>> + Send;

    /// Ask a natural-language question about the audited documents.
    fn ask_question(
        &self,
        question: &str,
    ) -> impl Future<Output = Result<ChatResponse, GatewayError>> + Send;
}

/// HTTP client for one audit backend.
pub struct AuditApi {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl AuditApi {
    /// Create a client with its own connection pool and the configured
    /// request timeout.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`]. The
    /// timeout is applied per request on top of the client's own settings.
    pub fn with_client(client: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            request_timeout: config.request_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a file for audit.
    ///
    /// Sends `POST /audit-file/` with the file in the multipart field
    /// `file`. The response body is returned as-is.
    pub async fn upload_file(&self, file: UploadFile) -> Result<AuditResult, GatewayError> {
        let filename = file.filename.clone();
        let size_bytes = file.size();
        tracing::debug!(filename = %filename, size_bytes, "Submitting file for audit");

        let result = self.send_upload(file).await;
        match &result {
            Ok(audit) => tracing::info!(
                filename = %filename,
                score = audit.score,
                status = %audit.status,
                "Audit completed",
            ),
            Err(e) => tracing::error!(filename = %filename, error = %e, "Audit upload failed"),
        }
        result
    }

    /// Ask a question about the audited documents.
    ///
    /// Sends `GET /ask/?question=...`. The question is passed through
    /// without validation.
    pub async fn ask_question(&self, question: &str) -> Result<ChatResponse, GatewayError> {
        tracing::debug!(question_len = question.len(), "Asking backend");

        let result = self.send_question(question).await;
        match &result {
            Ok(chat) => tracing::info!(
                has_sources = chat.sources.is_some(),
                "Question answered",
            ),
            Err(e) => tracing::error!(error = %e, "Question failed"),
        }
        result
    }

    // ---- private helpers ----

    async fn send_upload(&self, file: UploadFile) -> Result<AuditResult, GatewayError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.content_type)
            .map_err(GatewayError::Request)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(self.endpoint(AUDIT_FILE_PATH))
            .timeout(self.request_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.parse_response(response).await
    }

    async fn send_question(&self, question: &str) -> Result<ChatResponse, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(ASK_PATH))
            .timeout(self.request_timeout)
            .query(&[("question", question)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.parse_response(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        GatewayError::from_transport(err, self.request_timeout)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GatewayError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// The body is read in full first so a transport failure mid-body and
    /// a body of the wrong shape surface as different errors.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let response = self.ensure_success(response).await?;
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl AuditGateway for AuditApi {
    async fn upload_file(&self, file: UploadFile) -> Result<AuditResult, GatewayError> {
        AuditApi::upload_file(self, file).await
    }

    async fn ask_question(&self, question: &str) -> Result<ChatResponse, GatewayError> {
        AuditApi::ask_question(self, question).await
    }
}
