use std::path::Path;

use auditguardian_core::upload::{check_upload_size, content_type_for, MAX_UPLOAD_BYTES};
use tokio::io::AsyncReadExt;

use crate::error::GatewayError;

/// A file selected for upload, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    /// MIME type sent with the multipart part.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Wrap in-memory bytes; the content type is guessed from the name.
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename).to_string();
        Self {
            filename,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk. The upload keeps only the final path
    /// component as its name.
    ///
    /// Files over [`MAX_UPLOAD_BYTES`] are rejected from their metadata
    /// and never buffered.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("'{}' does not name a file", path.display()),
                )
            })?;
        check_upload_size(&filename, tokio::fs::metadata(path).await?.len(), MAX_UPLOAD_BYTES)?;

        // The file may grow after the metadata check; read at most one byte
        // past the limit.
        let mut bytes = Vec::new();
        tokio::fs::File::open(path)
            .await?
            .take(MAX_UPLOAD_BYTES + 1)
            .read_to_end(&mut bytes)
            .await?;
        check_upload_size(&filename, bytes.len() as u64, MAX_UPLOAD_BYTES)?;

        Ok(Self::new(filename, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use auditguardian_core::error::CoreError;

    use super::*;

    #[test]
    fn new_guesses_content_type() {
        let file = UploadFile::new("policy.pdf", b"%PDF-1.7".to_vec());
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.size(), 8);
    }

    #[tokio::test]
    async fn from_path_reads_file_and_keeps_basename() {
        let dir = std::env::temp_dir().join(format!("ag-upload-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("ledger.csv");
        tokio::fs::write(&path, b"id,amount\n1,10\n").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.filename, "ledger.csv");
        assert_eq!(file.content_type, "text/csv");
        assert_eq!(file.bytes, b"id,amount\n1,10\n");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn from_path_rejects_oversized_file_without_reading_it() {
        let dir = std::env::temp_dir().join(format!("ag-oversized-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("huge.csv");
        // Sparse: no data blocks are written.
        let file = tokio::fs::File::create(&path).await.unwrap();
        file.set_len(MAX_UPLOAD_BYTES + 1).await.unwrap();
        drop(file);

        let err = UploadFile::from_path(&path).await.unwrap_err();
        assert_matches!(err, GatewayError::Rejected(CoreError::Validation(msg)) => {
            assert!(msg.contains("huge.csv"));
        });

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn from_path_missing_file_is_io_error() {
        let err = UploadFile::from_path("/definitely/not/here.pdf").await.unwrap_err();
        assert!(matches!(err, GatewayError::Io(_)));
    }
}
