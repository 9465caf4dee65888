//! Append a new reading to a meter's log

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::images::{ImageOps, NewImage};
use super::last_reading::LastReadingUpdater;
use super::meter_locks::MeterLockRegistry;
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, WaterMeter, WaterMeterReading,
};

/// Incoming reading data
#[derive(Debug, Clone)]
pub struct NewReading {
    /// Raw value in the meter's declared unit, as a decimal string
    pub reading: String,
    /// Defaults to now
    pub reading_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub image: Option<NewImage>,
}

/// Result of a successful create; `image_error` carries a soft upload
/// failure, never a rolled-back reading.
#[derive(Debug)]
pub struct CreatedReading {
    pub reading: WaterMeterReading,
    pub meter: WaterMeter,
    pub image_error: Option<String>,
}

pub struct ReadingCreator {
    repos: Arc<dyn RepositoryProvider>,
    last_reading: Arc<LastReadingUpdater>,
    images: ImageOps,
    locks: Arc<MeterLockRegistry>,
}

impl ReadingCreator {
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

    pub async fn create(&self, meter_id: &str, input: NewReading) -> DomainResult<CreatedReading> {
        let _guard = self.locks.acquire(meter_id).await;

        let meter = self
            .repos
            .water_meters()
            .find_by_id(meter_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterMeter",
                field: "id",
                value: meter_id.to_string(),
            })?;

        let now = Utc::now();
        let reading_date = input.reading_date.unwrap_or(now);
        if reading_date > now {
            return Err(DomainError::ReadingDateNotAllowed);
        }

        let raw: Decimal = input.reading.trim().parse().map_err(|_| {
            DomainError::Validation(format!("'{}' is not a valid reading value", input.reading))
        })?;
        let normalized = meter.measurement_unit.normalize_value(raw)?;

        let last = self.repos.readings().find_last_reading(meter_id).await?;
        if let Some(last) = &last {
            if reading_date <= last.reading_date {
                return Err(DomainError::ReadingNotAllowed(
                    "reading date must be after the meter's last reading".to_string(),
                ));
            }
            if normalized < last.normalized_reading {
                return Err(DomainError::ReadingNotAllowed(
                    "a cumulative reading cannot be lower than the meter's last reading"
                        .to_string(),
                ));
            }
        }

        let reading = WaterMeterReading::new(
            Uuid::new_v4().to_string(),
            meter_id,
            raw,
            normalized,
            reading_date,
            input.notes,
        );
        self.repos.readings().save(reading.clone()).await?;

        let mut window = vec![reading.clone()];
        if let Some(last) = last {
            window.push(last);
        }
        let meter = self.last_reading.refresh(meter, &window).await?;

        let image_error = match input.image {
            None => None,
            Some(image) => self
                .images
                .attach_to_reading(&reading.id, image)
                .await
                .err(),
        };
        if let Some(error) = &image_error {
            warn!(reading_id = %reading.id, error = %error, "Reading image upload failed");
        }

        info!(meter_id, reading_id = %reading.id, "Reading recorded");

        Ok(CreatedReading {
            reading,
            meter,
            image_error,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
