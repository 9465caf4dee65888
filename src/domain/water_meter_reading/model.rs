//! Water meter reading domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One measurement event of a meter.
///
/// Readings are cumulative: across a meter's log ordered by `reading_date`,
/// `normalized_reading` never decreases and dates strictly increase. Rows
/// are immutable by convention; only the two most recent may be edited and
/// only the most recent deleted.
#[derive(Debug, Clone)]
pub struct WaterMeterReading {
    pub id: String,
    pub water_meter_id: String,
    /// Raw value exactly as reported, in the meter's declared unit
    pub reading: Decimal,
    /// Raw value converted to liters
    pub normalized_reading: f64,
    pub reading_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WaterMeterReading {
    pub fn new(
        id: impl Into<String>,
        water_meter_id: impl Into<String>,
        reading: Decimal,
        normalized_reading: f64,
        reading_date: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            water_meter_id: water_meter_id.into(),
            reading,
            normalized_reading,
            reading_date,
            notes,
            created_at: Utc::now(),
        }
    }
}
