//! Best-effort image attachment operations
//!
//! Image uploads and deletions run after the owning reading/meter mutation
//! has committed. Failures come back as plain strings for the caller to
//! surface on an otherwise successful result; nothing here rolls back.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    FileStorage, RepositoryProvider, WaterMeterImage, WaterMeterReadingImage,
};

/// Incoming image payload
#[derive(Debug, Clone)]
pub struct NewImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

/// Shared upload/delete helpers for the reading and meter use cases
#[derive(Clone)]
pub struct ImageOps {
    repos: Arc<dyn RepositoryProvider>,
    storage: Arc<dyn FileStorage>,
}

impl ImageOps {
    pub fn new(repos: Arc<dyn RepositoryProvider>, storage: Arc<dyn FileStorage>) -> Self {
        Self { repos, storage }
    }

    pub async fn attach_to_reading(
        &self,
        reading_id: &str,
        image: NewImage,
    ) -> Result<(), String> {
        let stored = self
            .storage
            .upload(
                &image.bytes,
                &image.file_name,
                &image.mime_type,
                reading_id,
                "readings",
            )
            .await
            .map_err(|e| e.to_string())?;

        let record = WaterMeterReadingImage {
            id: Uuid::new_v4().to_string(),
            water_meter_reading_id: reading_id.to_string(),
            url: stored.url,
            file_name: image.file_name,
            file_size: stored.file_size,
            mime_type: image.mime_type,
            uploaded_at: Utc::now(),
            external_key: stored.external_key,
        };
        self.repos
            .reading_images()
            .save(record)
            .await
            .map_err(|e| e.to_string())
    }

    /// Remove a reading's image record and stored object, if any.
    ///
    /// The record is removed even when the object deletion fails, so a
    /// follow-up upload never leaves two images attached; the failure is
    /// still reported.
    pub async fn detach_from_reading(&self, reading_id: &str) -> Result<(), String> {
        let Some(image) = self
            .repos
            .reading_images()
            .find_by_reading(reading_id)
            .await
            .map_err(|e| e.to_string())?
        else {
            return Ok(());
        };

        let object_error = self
            .storage
            .delete(&image.external_key)
            .await
            .err()
            .map(|e| e.to_string());

        self.repos
            .reading_images()
            .delete(&image.id)
            .await
            .map_err(|e| e.to_string())?;

        match object_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub async fn attach_to_meter(&self, meter_id: &str, image: NewImage) -> Result<(), String> {
        let stored = self
            .storage
            .upload(
                &image.bytes,
                &image.file_name,
                &image.mime_type,
                meter_id,
                "meters",
            )
            .await
            .map_err(|e| e.to_string())?;

        let record = WaterMeterImage {
            id: Uuid::new_v4().to_string(),
            water_meter_id: meter_id.to_string(),
            url: stored.url,
            file_name: image.file_name,
            file_size: stored.file_size,
            mime_type: image.mime_type,
            uploaded_at: Utc::now(),
            external_key: stored.external_key,
        };
        self.repos
            .meter_images()
            .save(record)
            .await
            .map_err(|e| e.to_string())
    }
}
