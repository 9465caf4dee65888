//! Edit one of the two most recent readings

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::images::{ImageOps, NewImage};
use super::last_reading::LastReadingUpdater;
use super::meter_locks::MeterLockRegistry;
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, WaterMeter, WaterMeterReading,
};

/// Partial update of a reading
#[derive(Debug, Clone, Default)]
pub struct ReadingUpdate {
    /// New raw value, if changing
    pub reading: Option<String>,
    pub notes: Option<String>,
    pub new_image: Option<NewImage>,
    pub delete_image: bool,
}

#[derive(Debug)]
pub struct UpdatedReading {
    pub reading: WaterMeterReading,
    pub meter: WaterMeter,
    pub image_delete_error: Option<String>,
    pub image_upload_error: Option<String>,
}

pub struct ReadingUpdater {
    repos: Arc<dyn RepositoryProvider>,
    last_reading: Arc<LastReadingUpdater>,
    images: ImageOps,
    locks: Arc<MeterLockRegistry>,
}

impl ReadingUpdater {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        last_reading: Arc<LastReadingUpdater>,
        images: ImageOps,
        locks: Arc<MeterLockRegistry>,
    ) -> Self {
        Self {
            repos,
            last_reading,
            images,
            locks,
        }
    }

    pub async fn update(
        &self,
        reading_id: &str,
        update: ReadingUpdate,
    ) -> DomainResult<UpdatedReading> {
        // Resolve the meter before locking, then re-read under the lock.
        let meter_id = self.load_reading(reading_id).await?.water_meter_id;
        let _guard = self.locks.acquire(&meter_id).await;

        let mut reading = self.load_reading(reading_id).await?;
        let meter = self
            .repos
            .water_meters()
            .find_by_id(&reading.water_meter_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterMeter",
                field: "id",
                value: reading.water_meter_id.clone(),
            })?;

        let recent = self.repos.readings().find_most_recent(&meter.id, 2).await?;
        let is_last = recent.first().map(|r| r.id == reading.id).unwrap_or(false);
        let is_previous = recent.get(1).map(|r| r.id == reading.id).unwrap_or(false);
        if !is_last && !is_previous {
            return Err(DomainError::ReadingNotLast);
        }

        if let Some(raw_value) = update.reading.as_deref() {
            let raw: Decimal = raw_value.trim().parse().map_err(|_| {
                DomainError::Validation(format!("'{}' is not a valid reading value", raw_value))
            })?;
            let normalized = meter.measurement_unit.normalize_value(raw)?;

            if is_last {
                // The newest value must stay at or above its predecessor.
                if let Some(previous) = recent.get(1) {
                    if normalized < previous.normalized_reading {
                        return Err(DomainError::ReadingNotAllowed(
                            "an edited reading cannot drop below the previous reading"
                                .to_string(),
                        ));
                    }
                }
            } else {
                // The previous value must stay at or below the newer one.
                let newer = &recent[0];
                if normalized > newer.normalized_reading {
                    return Err(DomainError::ReadingNotAllowed(
                        "an edited reading cannot exceed the most recent reading".to_string(),
                    ));
                }
            }

            reading.reading = raw;
            reading.normalized_reading = normalized;
        }

        if let Some(notes) = update.notes {
            reading.notes = Some(notes);
        }

        self.repos.readings().update(reading.clone()).await?;

        // The engine is the sole writer of the snapshot; re-derive from the
        // canonical top-two even when only notes changed.
        let window = self.repos.readings().find_most_recent(&meter.id, 2).await?;
        let meter = self.last_reading.refresh(meter, &window).await?;

        let mut image_delete_error = None;
        if update.delete_image || update.new_image.is_some() {
            image_delete_error = self.images.detach_from_reading(&reading.id).await.err();
        }
        let mut image_upload_error = None;
        if let Some(image) = update.new_image {
            image_upload_error = self.images.attach_to_reading(&reading.id, image).await.err();
        }
        if let Some(error) = &image_delete_error {
            warn!(reading_id = %reading.id, error = %error, "Reading image delete failed");
        }
        if let Some(error) = &image_upload_error {
            warn!(reading_id = %reading.id, error = %error, "Reading image upload failed");
        }

        info!(reading_id = %reading.id, meter_id = %meter.id, "Reading updated");

        Ok(UpdatedReading {
            reading,
            meter,
            image_delete_error,
            image_upload_error,
        })
    }

    async fn load_reading(&self, reading_id: &str) -> DomainResult<WaterMeterReading> {
        self.repos
            .readings()
            .find_by_id(reading_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterMeterReading",
                field: "id",
                value: reading_id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::water::testing::{
        meter_with_population, reading_days_ago, repos_with_rule, FakeStorage, InMemoryLookup,
        InMemoryRepos,
    };
    use crate::domain::LimitRuleType;
    use std::sync::atomic::Ordering;

    async fn updater_fixture() -> (Arc<InMemoryRepos>, Arc<FakeStorage>, ReadingUpdater) {
        let repos = repos_with_rule(LimitRuleType::PersonBased, 100.0).await;
        let storage = FakeStorage::new();
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let last_reading = Arc::new(LastReadingUpdater::new(repos.clone(), lookup));
        let images = ImageOps::new(repos.clone(), storage.clone());
        let updater = ReadingUpdater::new(
            repos.clone(),
            last_reading,
            images,
            Arc::new(MeterLockRegistry::new()),
        );
        (repos, storage, updater)
    }

    /// Meter with three readings: 1000 (20d ago), 5000 (10d ago), 9000 (today).
    async fn seeded(repos: &Arc<InMemoryRepos>) {
        meter_with_population(repos, "WM-1", 15, 0).await;
        for (value, days) in [(1_000.0, 20), (5_000.0, 10), (9_000.0, 0)] {
            repos
                .readings()
                .save(reading_days_ago("WM-1", value, days))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn editing_an_old_reading_is_rejected() {
        let (repos, _storage, updater) = updater_fixture().await;
        seeded(&repos).await;

        let err = updater
            .update(
                "R-WM-1-20",
                ReadingUpdate {
                    notes: Some("late correction".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReadingNotLast));
    }

    #[tokio::test]
    async fn unknown_reading_is_not_found() {
        let (_repos, _storage, updater) = updater_fixture().await;
        let err = updater
            .update("missing", ReadingUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "WaterMeterReading", .. }
        ));
    }

    #[tokio::test]
    async fn newest_cannot_drop_below_previous() {
        let (repos, _storage, updater) = updater_fixture().await;
        seeded(&repos).await;

        let err = updater
            .update(
                "R-WM-1-0",
                ReadingUpdate {
                    reading: Some("4999".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReadingNotAllowed(_)));
    }

    #[tokio::test]
    async fn previous_cannot_exceed_newest() {
        let (repos, _storage, updater) = updater_fixture().await;
        seeded(&repos).await;

        let err = updater
            .update(
                "R-WM-1-10",
                ReadingUpdate {
                    reading: Some("9001".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ReadingNotAllowed(_)));
    }

    #[tokio::test]
    async fn value_edit_refreshes_snapshot() {
        let (repos, _storage, updater) = updater_fixture().await;
        seeded(&repos).await;

        let updated = updater
            .update(
                "R-WM-1-0",
                ReadingUpdate {
                    reading: Some("20000".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.reading.normalized_reading, 20_000.0);
        assert_eq!(updated.meter.last_reading_normalized_value, Some(20_000.0));
        // 20000 / 10 = 2000 > 1500 (15 people × 100)
        assert_eq!(updated.meter.last_reading_excess_consumption, Some(true));
    }

    #[tokio::test]
    async fn editing_the_previous_reading_recomputes_from_the_newest() {
        let (repos, _storage, updater) = updater_fixture().await;
        seeded(&repos).await;

        let updated = updater
            .update(
                "R-WM-1-10",
                ReadingUpdate {
                    reading: Some("6000".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Snapshot still derives from the newest reading (9000, today).
        assert_eq!(updated.meter.last_reading_normalized_value, Some(9_000.0));
        // 9000 / 10 = 900 < 1500
        assert_eq!(updated.meter.last_reading_excess_consumption, Some(false));
    }

    #[tokio::test]
    async fn notes_only_edit_still_refreshes_snapshot() {
        let (repos, _storage, updater) = updater_fixture().await;
        seeded(&repos).await;

        let updated = updater
            .update(
                "R-WM-1-0",
                ReadingUpdate {
                    notes: Some("verified on site".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.reading.notes.as_deref(), Some("verified on site"));
        assert_eq!(updated.meter.last_reading_normalized_value, Some(9_000.0));
        assert!(updated.meter.last_reading_date.is_some());
    }

    #[tokio::test]
    async fn replace_deletes_old_image_before_upload() {
        let (repos, storage, updater) = updater_fixture().await;
        seeded(&repos).await;
        let images = ImageOps::new(repos.clone(), storage.clone());
        images
            .attach_to_reading(
                "R-WM-1-0",
                NewImage {
                    bytes: vec![1],
                    file_name: "old.jpg".to_string(),
                    mime_type: "image/jpeg".to_string(),
                },
            )
            .await
            .unwrap();

        let updated = updater
            .update(
                "R-WM-1-0",
                ReadingUpdate {
                    new_image: Some(NewImage {
                        bytes: vec![2, 2],
                        file_name: "new.jpg".to_string(),
                        mime_type: "image/jpeg".to_string(),
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.image_delete_error.is_none());
        assert!(updated.image_upload_error.is_none());
        let attached = repos.reading_images.lock().unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].file_name, "new.jpg");
        assert_eq!(storage.deleted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn image_failures_do_not_block_the_edit() {
        let (repos, storage, updater) = updater_fixture().await;
        seeded(&repos).await;
        storage.fail_uploads.store(true, Ordering::SeqCst);

        let updated = updater
            .update(
                "R-WM-1-0",
                ReadingUpdate {
                    reading: Some("9500".to_string()),
                    new_image: Some(NewImage {
                        bytes: vec![1],
                        file_name: "shot.jpg".to_string(),
                        mime_type: "image/jpeg".to_string(),
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.image_upload_error.is_some());
        assert_eq!(updated.reading.normalized_reading, 9_500.0);
        assert_eq!(updated.meter.last_reading_normalized_value, Some(9_500.0));
    }

    #[tokio::test]
    async fn delete_image_flag_removes_attachment() {
        let (repos, storage, updater) = updater_fixture().await;
        seeded(&repos).await;
        let images = ImageOps::new(repos.clone(), storage.clone());
        images
            .attach_to_reading(
                "R-WM-1-0",
                NewImage {
                    bytes: vec![1],
                    file_name: "old.jpg".to_string(),
                    mime_type: "image/jpeg".to_string(),
                },
            )
            .await
            .unwrap();

        let updated = updater
            .update(
                "R-WM-1-0",
                ReadingUpdate {
                    delete_image: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.image_delete_error.is_none());
        assert!(repos.reading_images.lock().unwrap().is_empty());
    }
}
