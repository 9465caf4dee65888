//! Replace a physical meter at its water point

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::images::{ImageOps, NewImage};
use super::reading_creator::{NewReading, ReadingCreator};
use crate::domain::{
    DomainError, DomainResult, MeasurementUnit, RepositoryProvider, WaterMeter,
    WaterMeterReading,
};

/// Note attached to the closing reading of the decommissioned meter
pub const FINAL_READING_NOTE: &str = "Final reading before meter replacement";
/// Note attached to the zero bootstrap reading of the new meter
pub const BOOTSTRAP_READING_NOTE: &str = "Initial reading of replacement meter";

#[derive(Debug, Clone)]
pub struct MeterReplacement {
    /// Defaults to now; never in the future
    pub replacement_date: Option<DateTime<Utc>>,
    /// Closing raw value for the old meter, in its declared unit
    pub final_reading: Option<String>,
    pub new_meter_name: String,
    pub new_measurement_unit: MeasurementUnit,
    pub device_image: Option<NewImage>,
}

/// Summary of the replacement steps
#[derive(Debug)]
pub struct ReplacedMeter {
    pub old_meter: WaterMeter,
    pub new_meter: WaterMeter,
    pub final_reading_recorded: bool,
    pub bootstrap_reading: WaterMeterReading,
    /// Soft failure from the device photo upload, if any
    pub image_error: Option<String>,
}

pub struct WaterMeterReplacer {
    repos: Arc<dyn RepositoryProvider>,
    creator: Arc<ReadingCreator>,
    images: ImageOps,
}

impl WaterMeterReplacer {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        creator: Arc<ReadingCreator>,
        images: ImageOps,
    ) -> Self {
        Self {
            repos,
            creator,
            images,
        }
    }

    /// Close out `meter_id` and install a new meter at the same water point.
    ///
    /// Reading creation goes through `ReadingCreator`, which takes the
    /// per-meter lock; this orchestrator holds no lock of its own.
    pub async fn replace(
        &self,
        meter_id: &str,
        request: MeterReplacement,
    ) -> DomainResult<ReplacedMeter> {
        let now = Utc::now();
        let replacement_date = request.replacement_date.unwrap_or(now);
        if replacement_date > now {
            return Err(DomainError::ReadingDateNotAllowed);
        }

        let old_meter = self
            .repos
            .water_meters()
            .find_by_id(meter_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterMeter",
                field: "id",
                value: meter_id.to_string(),
            })?;
        if !old_meter.is_active {
            return Err(DomainError::WaterMeterInactive(old_meter.id));
        }

        let mut final_reading_recorded = false;
        if let Some(value) = request.final_reading {
            self.creator
                .create(
                    meter_id,
                    NewReading {
                        reading: value,
                        reading_date: Some(replacement_date),
                        notes: Some(FINAL_READING_NOTE.to_string()),
                        image: None,
                    },
                )
                .await?;
            final_reading_recorded = true;
        }

        // Re-read: the final reading refreshed the old meter's snapshot.
        let mut old_meter = self
            .repos
            .water_meters()
            .find_by_id(meter_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterMeter",
                field: "id",
                value: meter_id.to_string(),
            })?;
        old_meter.deactivate();
        self.repos.water_meters().update(old_meter.clone()).await?;

        let new_meter = WaterMeter::new(
            Uuid::new_v4().to_string(),
            request.new_meter_name,
            old_meter.water_account_id.clone(),
            request.new_measurement_unit,
            old_meter.water_point.clone(),
        );
        self.repos.water_meters().save(new_meter.clone()).await?;

        let image_error = match request.device_image {
            None => None,
            Some(image) => self.images.attach_to_meter(&new_meter.id, image).await.err(),
        };
        if let Some(error) = &image_error {
            warn!(meter_id = %new_meter.id, error = %error, "Device photo upload failed");
        }

        let bootstrap = self
            .creator
            .create(
                &new_meter.id,
                NewReading {
                    reading: "0".to_string(),
                    reading_date: Some(replacement_date),
                    notes: Some(BOOTSTRAP_READING_NOTE.to_string()),
                    image: None,
                },
            )
            .await?;

        info!(
            old_meter_id = %old_meter.id,
            new_meter_id = %new_meter.id,
            final_reading_recorded,
            "Water meter replaced"
        );

        Ok(ReplacedMeter {
            old_meter,
            new_meter: bootstrap.meter,
            final_reading_recorded,
            bootstrap_reading: bootstrap.reading,
            image_error,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
