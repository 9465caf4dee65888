//! In-memory file storage

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{FileStorage, StorageError, StoredObject};

/// Keeps uploads in memory; used in tests and ad-hoc setups without a
/// writable data directory. Applies the same validation as the disk store.
#[derive(Default)]
pub struct InMemoryFileStorage {
    objects: DashMap<String, Vec<u8>>,
    allowed_mime_types: Vec<String>,
    max_file_size_bytes: usize,
}

impl InMemoryFileStorage {
    pub fn new(allowed_mime_types: Vec<String>, max_file_size_bytes: usize) -> Self {
        Self {
            objects: DashMap::new(),
            allowed_mime_types,
            max_file_size_bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn upload(
        &self,
        bytes: &[u8],
        _file_name: &str,
        mime_type: &str,
        owner_id: &str,
        folder: &str,
    ) -> Result<StoredObject, StorageError> {
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

        let key = format!("{}/{}/{}", folder, owner_id, Uuid::new_v4());
        self.objects.insert(key.clone(), bytes.to_vec());
        Ok(StoredObject {
            url: format!("memory://{}", key),
            external_key: key,
            file_size: bytes.len() as i64,
        })
    }

    async fn delete(&self, external_key: &str) -> Result<(), StorageError> {
        self.objects.remove(external_key);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> InMemoryFileStorage {
        InMemoryFileStorage::new(vec!["image/png".to_string()], 64)
    }

    #[tokio::test]
    async fn upload_then_delete() {
        let storage = storage();
        let stored = storage
            .upload(b"png-bytes", "a.png", "image/png", "WM-1", "meters")
            .await
            .unwrap();
        assert_eq!(storage.len(), 1);

        storage.delete(&stored.external_key).await.unwrap();
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn validation_mirrors_the_disk_store() {
        let storage = storage();
        assert!(matches!(
            storage
                .upload(b"x", "a.gif", "image/gif", "WM-1", "meters")
                .await,
            Err(StorageError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            storage
                .upload(&[0u8; 65], "a.png", "image/png", "WM-1", "meters")
                .await,
            Err(StorageError::FileTooLarge { .. })
        ));
    }
}
