//! Client-side checks run before a file is sent for audit.
//!
//! A file that fails these checks never reaches the network.

use crate::error::CoreError;

/// 50 MiB, the largest upload either screen accepts.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Which files an upload entry point accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadRule {
    /// Human-readable name used in validation messages.
    pub label: &'static str,
    /// Lower-case extensions without the dot.
    pub extensions: &'static [&'static str],
    pub max_bytes: u64,
}

/// Policy documents uploaded from the policy navigator.
pub const POLICY_DOCUMENT_UPLOAD: UploadRule = UploadRule {
    label: "policy document",
    extensions: &["pdf", "docx"],
    max_bytes: MAX_UPLOAD_BYTES,
};

/// Transaction exports uploaded to the transaction sentinel.
pub const TRANSACTION_DATA_UPLOAD: UploadRule = UploadRule {
    label: "transaction data",
    extensions: &["csv", "xls", "xlsx"],
    max_bytes: MAX_UPLOAD_BYTES,
};

/// Lower-cased extension of `filename`, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate a file against an upload rule.
pub fn validate_upload(filename: &str, size_bytes: u64, rule: &UploadRule) -> Result<(), CoreError> {
    if filename.trim().is_empty() {
        return Err(CoreError::Validation("File name must not be empty".to_string()));
    }

    let accepted = file_extension(filename)
        .is_some_and(|ext| rule.extensions.iter().any(|allowed| *allowed == ext));
    if !accepted {
        return Err(CoreError::Validation(format!(
            "'{filename}' is not a supported {} file. Accepted types: {}",
            rule.label,
            rule.extensions.join(", ")
        )));
    }

    if size_bytes == 0 {
        return Err(CoreError::Validation(format!("'{filename}' is empty")));
    }

    check_upload_size(filename, size_bytes, rule.max_bytes)
}

/// Reject a file larger than `max_bytes`. Runs before a file is read from
/// disk, so only the size is checked.
pub fn check_upload_size(filename: &str, size_bytes: u64, max_bytes: u64) -> Result<(), CoreError> {
    if size_bytes > max_bytes {
        return Err(CoreError::Validation(format!(
            "'{filename}' is {size_bytes} bytes; the limit is {max_bytes} bytes"
        )));
    }
    Ok(())
}

/// MIME type sent with the multipart part, guessed from the extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match file_extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("csv") => "text/csv",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
