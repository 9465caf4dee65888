//! Water meter DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{WaterMeter, WaterPoint};
use crate::interfaces::http::common::ImageUpload;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WaterPointRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub location: String,
    #[validate(range(min = 0))]
    pub fixed_population: i32,
    #[validate(range(min = 0))]
    pub floating_population: i32,
    #[validate(length(min = 1, max = 100))]
    pub cadastral_reference: String,
    #[validate(length(min = 1))]
    pub community_zone_id: String,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl WaterPointRequest {
    pub fn into_domain(self) -> WaterPoint {
        WaterPoint {
            name: self.name,
            location: self.location,
            fixed_population: self.fixed_population,
            floating_population: self.floating_population,
            cadastral_reference: self.cadastral_reference,
            community_zone_id: self.community_zone_id,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWaterMeterRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub water_account_id: String,
    /// L or M3
    #[validate(length(min = 1, max = 5))]
    pub measurement_unit: String,
    #[validate(nested)]
    pub water_point: WaterPointRequest,
    /// Optional device photo
    #[validate(nested)]
    pub device_image: Option<ImageUpload>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WaterPointDto {
    pub name: String,
    pub location: String,
    pub fixed_population: i32,
    pub floating_population: i32,
    pub cadastral_reference: String,
    pub community_zone_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WaterMeterDto {
    pub id: String,
    pub name: String,
    pub water_account_id: String,
    pub measurement_unit: String,
    pub water_point: WaterPointDto,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reading_normalized_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reading_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reading_excess_consumption: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WaterMeterDto {
    pub fn from_domain(meter: WaterMeter) -> Self {
        Self {
            id: meter.id,
            name: meter.name,
            water_account_id: meter.water_account_id,
            measurement_unit: meter.measurement_unit.as_str().to_string(),
            water_point: WaterPointDto {
                name: meter.water_point.name,
                location: meter.water_point.location,
                fixed_population: meter.water_point.fixed_population,
                floating_population: meter.water_point.floating_population,
                cadastral_reference: meter.water_point.cadastral_reference,
                community_zone_id: meter.water_point.community_zone_id,
                notes: meter.water_point.notes,
            },
            is_active: meter.is_active,
            last_reading_normalized_value: meter.last_reading_normalized_value,
            last_reading_date: meter.last_reading_date,
            last_reading_excess_consumption: meter.last_reading_excess_consumption,
            created_at: meter.created_at,
            updated_at: meter.updated_at,
        }
    }
}

/// Create-meter response; `image_error` is a soft device-photo failure
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedWaterMeterResponse {
    pub meter: WaterMeterDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReplaceWaterMeterRequest {
    /// Defaults to now; never in the future
    pub replacement_date: Option<DateTime<Utc>>,
    /// Closing raw value for the old meter
    #[validate(length(min = 1, max = 50))]
    pub final_reading: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub new_meter_name: String,
    /// L or M3
    #[validate(length(min = 1, max = 5))]
    pub new_measurement_unit: String,
    #[validate(nested)]
    pub device_image: Option<ImageUpload>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReplacedWaterMeterResponse {
    pub old_meter: WaterMeterDto,
    pub new_meter: WaterMeterDto,
    pub final_reading_recorded: bool,
    pub bootstrap_reading_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewAccountRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub national_id: String,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Either `water_account_id` or `new_account` must be present
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeOwnerRequest {
    pub water_account_id: Option<String>,
    #[validate(nested)]
    pub new_account: Option<NewAccountRequest>,
}

/// Meter list filter
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct WaterMeterFilter {
    pub water_account_id: Option<String>,
    pub is_active: Option<bool>,
}
