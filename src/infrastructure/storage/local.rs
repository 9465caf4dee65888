//! Local-disk file storage

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{FileStorage, StorageError, StoredObject};

/// Stores uploads under a configured root directory and serves them from a
/// public base URL. The store key doubles as the relative path.
pub struct LocalFileStorage {
    root: PathBuf,
    base_url: String,
    allowed_mime_types: Vec<String>,
    max_file_size_bytes: usize,
}

impl LocalFileStorage {
    pub fn new(
        root: impl Into<PathBuf>,
        base_url: impl Into<String>,
        allowed_mime_types: Vec<String>,
        max_file_size_bytes: usize,
    ) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
            allowed_mime_types,
            max_file_size_bytes,
        }
    }

    fn validate(&self, bytes: &[u8], mime_type: &str) -> Result<(), StorageError> {
        if !self
            .allowed_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime_type))
        {
            return Err(StorageError::UnsupportedMediaType(mime_type.to_string()));
        }
        if bytes.len() > self.max_file_size_bytes {
            return Err(StorageError::FileTooLarge {
                size: bytes.len(),
                max: self.max_file_size_bytes,
            });
        }
        Ok(())
    }
}

fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn upload(
        &self,
        bytes: &[u8],
        file_name: &str,
        mime_type: &str,
        owner_id: &str,
        folder: &str,
    ) -> Result<StoredObject, StorageError> {
        self.validate(bytes, mime_type)?;

        let key = format!(
            "{}/{}/{}{}",
            folder,
            owner_id,
            Uuid::new_v4(),
            extension_of(file_name)
        );
        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        debug!(key, size = bytes.len(), "File stored");

        Ok(StoredObject {
            url: format!("{}/{}", self.base_url.trim_end_matches('/'), key),
            external_key: key,
            file_size: bytes.len() as i64,
        })
    }

    async fn delete(&self, external_key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.root.join(external_key)).await {
            Ok(()) => Ok(()),
            // Deleting an already-gone object is not an error.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_in_temp() -> LocalFileStorage {
        let root = std::env::temp_dir().join(format!("aquameter-test-{}", Uuid::new_v4()));
        LocalFileStorage::new(
            root,
            "http://localhost:8080/files",
            vec!["image/jpeg".to_string(), "image/png".to_string()],
            1024,
        )
    }

    #[tokio::test]
    async fn upload_writes_and_delete_removes() {
        let storage = storage_in_temp();
        let stored = storage
            .upload(b"abc", "photo.jpg", "image/jpeg", "R-1", "readings")
            .await
            .unwrap();

        assert!(stored.external_key.starts_with("readings/R-1/"));
        assert!(stored.external_key.ends_with(".jpg"));
        assert!(stored.url.contains("/files/readings/R-1/"));
        assert_eq!(stored.file_size, 3);

        storage.delete(&stored.external_key).await.unwrap();
        // Idempotent
        storage.delete(&stored.external_key).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_mime_type_is_rejected() {
        let storage = storage_in_temp();
        let err = storage
            .upload(b"abc", "doc.pdf", "application/pdf", "R-1", "readings")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn oversize_file_is_rejected() {
        let storage = storage_in_temp();
        let big = vec![0u8; 2048];
        let err = storage
            .upload(&big, "photo.jpg", "image/jpeg", "R-1", "readings")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::FileTooLarge { size: 2048, max: 1024 }
        ));
    }
}
