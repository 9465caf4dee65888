//! Water meter reading DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{WaterMeterReading, WaterMeterReadingImage};
use crate::interfaces::http::common::ImageUpload;
use crate::interfaces::http::modules::water_meters::WaterMeterDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReadingRequest {
    /// Raw value in the meter's declared unit, as a decimal string
    #[validate(length(min = 1, max = 50))]
    pub reading: String,
    /// Defaults to now; never in the future
    pub reading_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    #[validate(nested)]
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReadingRequest {
    /// New raw value, if changing
    #[validate(length(min = 1, max = 50))]
    pub reading: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    #[validate(nested)]
    pub image: Option<ImageUpload>,
    /// Remove the attached photo
    #[serde(default)]
    pub delete_image: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingImageDto {
    pub id: String,
    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ReadingImageDto {
    pub fn from_domain(image: WaterMeterReadingImage) -> Self {
        Self {
            id: image.id,
            url: image.url,
            file_name: image.file_name,
            file_size: image.file_size,
            mime_type: image.mime_type,
            uploaded_at: image.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    pub id: String,
    pub water_meter_id: String,
    /// Raw value as recorded
    pub reading: String,
    /// Value in liters
    pub normalized_reading: f64,
    pub reading_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Attached evidence photo; populated on single-reading lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ReadingImageDto>,
}

impl ReadingDto {
    pub fn from_domain(reading: WaterMeterReading) -> Self {
        Self {
            id: reading.id,
            water_meter_id: reading.water_meter_id,
            reading: reading.reading.to_string(),
            normalized_reading: reading.normalized_reading,
            reading_date: reading.reading_date,
            notes: reading.notes,
            created_at: reading.created_at,
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<WaterMeterReadingImage>) -> Self {
        self.image = image.map(ReadingImageDto::from_domain);
        self
    }
}

/// Create-reading response; image failures are soft
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedReadingResponse {
    pub reading: ReadingDto,
    pub meter: WaterMeterDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

/// Update-reading response; image failures are soft and independent
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedReadingResponse {
    pub reading: ReadingDto,
    pub meter: WaterMeterDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_delete_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_upload_error: Option<String>,
}

/// Delete-reading response
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedReadingResponse {
    pub meter: WaterMeterDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}
