//! Image attachment domain entities

use chrono::{DateTime, Utc};

/// Device photo attached to a meter (at most one per meter)
#[derive(Debug, Clone)]
pub struct WaterMeterImage {
    pub id: String,
    pub water_meter_id: String,
    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
    /// Key in the external file store, used for deletion
    pub external_key: String,
}

/// Evidence photo attached to a reading (at most one per reading)
#[derive(Debug, Clone)]
pub struct WaterMeterReadingImage {
    pub id: String,
    pub water_meter_reading_id: String,
    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub external_key: String,
}
