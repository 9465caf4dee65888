//! Delete a meter's most recent reading

use std::sync::Arc;

use tracing::{info, warn};

use super::images::ImageOps;
use super::last_reading::LastReadingUpdater;
use super::meter_locks::MeterLockRegistry;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, WaterMeter};

#[derive(Debug)]
pub struct DeletedReading {
    pub meter: WaterMeter,
    /// Soft failure from the attached image cleanup, if any
    pub image_error: Option<String>,
}

pub struct ReadingDeleter {
    repos: Arc<dyn RepositoryProvider>,
    last_reading: Arc<LastReadingUpdater>,
    images: ImageOps,
    locks: Arc<MeterLockRegistry>,
}

impl ReadingDeleter {
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

    pub async fn delete(&self, reading_id: &str) -> DomainResult<DeletedReading> {
        let meter_id = self
            .repos
            .readings()
            .find_by_id(reading_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterMeterReading",
                field: "id",
                value: reading_id.to_string(),
            })?
            .water_meter_id;
        let _guard = self.locks.acquire(&meter_id).await;

        let reading = self
            .repos
            .readings()
            .find_by_id(reading_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterMeterReading",
                field: "id",
                value: reading_id.to_string(),
            })?;
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

        // Deleting interior history would break the ordering invariant.
        match self.repos.readings().find_last_reading(&meter.id).await? {
            Some(last) if last.id == reading.id => {}
            _ => return Err(DomainError::CanOnlyDeleteMostRecentReading),
        }

        let image_error = self.images.detach_from_reading(&reading.id).await.err();
        if let Some(error) = &image_error {
            warn!(reading_id = %reading.id, error = %error, "Reading image cleanup failed");
        }

        self.repos.readings().delete(&reading.id).await?;

        let remaining = self.repos.readings().find_most_recent(&meter.id, 2).await?;
        let meter = if remaining.is_empty() {
            self.last_reading.clear(meter).await?
        } else {
            self.last_reading.refresh(meter, &remaining).await?
        };

        info!(reading_id, meter_id = %meter.id, "Reading deleted");

        Ok(DeletedReading { meter, image_error })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::water::images::NewImage;
    use crate::application::water::testing::{
        meter_with_population, reading_days_ago, repos_with_rule, FakeStorage, InMemoryLookup,
        InMemoryRepos,
    };
    use crate::domain::LimitRuleType;
    use std::sync::atomic::Ordering;

    async fn deleter_fixture() -> (Arc<InMemoryRepos>, Arc<FakeStorage>, ReadingDeleter) {
        let repos = repos_with_rule(LimitRuleType::PersonBased, 100.0).await;
        let storage = FakeStorage::new();
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let last_reading = Arc::new(LastReadingUpdater::new(repos.clone(), lookup));
        let images = ImageOps::new(repos.clone(), storage.clone());
        let deleter = ReadingDeleter::new(
            repos.clone(),
            last_reading,
            images,
            Arc::new(MeterLockRegistry::new()),
        );
        (repos, storage, deleter)
    }

    #[tokio::test]
    async fn deleting_an_interior_reading_is_rejected() {
        let (repos, _storage, deleter) = deleter_fixture().await;
        meter_with_population(&repos, "WM-1", 15, 0).await;
        for (value, days) in [(1_000.0, 20), (5_000.0, 10), (9_000.0, 0)] {
            repos
                .readings()
                .save(reading_days_ago("WM-1", value, days))
                .await
                .unwrap();
        }

        let err = deleter.delete("R-WM-1-10").await.unwrap_err();
        assert!(matches!(err, DomainError::CanOnlyDeleteMostRecentReading));
        // No mutation happened.
        assert_eq!(repos.readings.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn deleting_the_newest_rederives_the_snapshot() {
        let (repos, _storage, deleter) = deleter_fixture().await;
        let mut meter = meter_with_population(&repos, "WM-1", 15, 0).await;
        for (value, days) in [(1_000.0, 20), (5_000.0, 10), (9_000.0, 0)] {
            repos
                .readings()
                .save(reading_days_ago("WM-1", value, days))
                .await
                .unwrap();
        }
        meter.set_last_reading(9_000.0, chrono::Utc::now(), false);
        repos.water_meters().update(meter).await.unwrap();

        let deleted = deleter.delete("R-WM-1-0").await.unwrap();

        // Snapshot now derives from 5000 (10d ago) over the 1000 (20d ago):
        // 5000 / 10 = 500 < 1500.
        assert_eq!(deleted.meter.last_reading_normalized_value, Some(5_000.0));
        assert_eq!(deleted.meter.last_reading_excess_consumption, Some(false));
        assert_eq!(repos.readings.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleting_the_only_reading_clears_the_snapshot() {
        let (repos, _storage, deleter) = deleter_fixture().await;
        let mut meter = meter_with_population(&repos, "WM-1", 15, 0).await;
        repos
            .readings()
            .save(reading_days_ago("WM-1", 1_000.0, 0))
            .await
            .unwrap();
        meter.set_last_reading(1_000.0, chrono::Utc::now(), false);
        repos.water_meters().update(meter).await.unwrap();

        let deleted = deleter.delete("R-WM-1-0").await.unwrap();

        assert!(!deleted.meter.has_last_reading());
        assert!(deleted.meter.last_reading_date.is_none());
        assert!(repos.readings.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_reading_is_not_found() {
        let (_repos, _storage, deleter) = deleter_fixture().await;
        let err = deleter.delete("missing").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "WaterMeterReading", .. }
        ));
    }

    #[tokio::test]
    async fn failed_image_cleanup_does_not_block_the_delete() {
        let (repos, storage, deleter) = deleter_fixture().await;
        meter_with_population(&repos, "WM-1", 15, 0).await;
        repos
            .readings()
            .save(reading_days_ago("WM-1", 1_000.0, 0))
            .await
            .unwrap();
        let images = ImageOps::new(repos.clone(), storage.clone());
        images
            .attach_to_reading(
                "R-WM-1-0",
                NewImage {
                    bytes: vec![1],
                    file_name: "shot.jpg".to_string(),
                    mime_type: "image/jpeg".to_string(),
                },
            )
            .await
            .unwrap();
        storage.fail_deletes.store(true, Ordering::SeqCst);

        let deleted = deleter.delete("R-WM-1-0").await.unwrap();

        assert!(deleted.image_error.is_some());
        assert!(repos.readings.lock().unwrap().is_empty());
        // The record is gone even though the stored object lingers.
        assert!(repos.reading_images.lock().unwrap().is_empty());
    }
}
