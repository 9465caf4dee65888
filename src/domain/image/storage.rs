//! File storage contract
//!
//! External collaborator for image bytes. Callers treat every operation as
//! best-effort: a storage failure is reported alongside the primary result,
//! never propagated as a fatal error of the owning mutation.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("File of {size} bytes exceeds the {max} byte limit")]
    FileTooLarge { size: usize, max: usize },

    #[error("Storage I/O error: {0}")]
    Io(String),
}

/// Handle to an uploaded object
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub url: String,
    pub external_key: String,
    pub file_size: i64,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Validate and store a file, returning its public URL and store key.
    ///
    /// Mime type and size are checked against the configured whitelist and
    /// ceiling before any write is attempted.
    async fn upload(
        &self,
        bytes: &[u8],
        file_name: &str,
        mime_type: &str,
        owner_id: &str,
        folder: &str,
    ) -> Result<StoredObject, StorageError>;

    async fn delete(&self, external_key: &str) -> Result<(), StorageError>;
}
