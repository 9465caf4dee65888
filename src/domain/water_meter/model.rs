//! Water meter domain entity

use chrono::{DateTime, Utc};

use crate::domain::MeasurementUnit;

/// Physical location a meter is installed at.
///
/// Population counts feed the person-based consumption limit; the community
/// zone links the meter to the community whose limit rule applies.
#[derive(Debug, Clone)]
pub struct WaterPoint {
    pub name: String,
    pub location: String,
    pub fixed_population: i32,
    pub floating_population: i32,
    pub cadastral_reference: String,
    pub community_zone_id: String,
    pub notes: Option<String>,
}

impl WaterPoint {
    pub fn total_population(&self) -> i32 {
        self.fixed_population + self.floating_population
    }
}

/// Water meter aggregate
///
/// Carries a denormalized snapshot of its most recent reading
/// (`last_reading_*`). The three fields are always set or cleared together
/// and must match what the reading log derives; `LastReadingUpdater` is the
/// only writer.
#[derive(Debug, Clone)]
pub struct WaterMeter {
    pub id: String,
    pub name: String,
    /// Owning account, mutable via the owner-change operation
    pub water_account_id: String,
    pub measurement_unit: MeasurementUnit,
    pub water_point: WaterPoint,
    pub is_active: bool,
    pub last_reading_normalized_value: Option<f64>,
    pub last_reading_date: Option<DateTime<Utc>>,
    pub last_reading_excess_consumption: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WaterMeter {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        water_account_id: impl Into<String>,
        measurement_unit: MeasurementUnit,
        water_point: WaterPoint,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            water_account_id: water_account_id.into(),
            measurement_unit,
            water_point,
            is_active: true,
            last_reading_normalized_value: None,
            last_reading_date: None,
            last_reading_excess_consumption: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the denormalized last-reading snapshot.
    pub fn set_last_reading(&mut self, normalized_value: f64, date: DateTime<Utc>, excess: bool) {
        self.last_reading_normalized_value = Some(normalized_value);
        self.last_reading_date = Some(date);
        self.last_reading_excess_consumption = Some(excess);
        self.updated_at = Utc::now();
    }

    /// Clear the snapshot when the reading log becomes empty.
    pub fn clear_last_reading(&mut self) {
        self.last_reading_normalized_value = None;
        self.last_reading_date = None;
        self.last_reading_excess_consumption = None;
        self.updated_at = Utc::now();
    }

    pub fn has_last_reading(&self) -> bool {
        self.last_reading_normalized_value.is_some()
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn reassign_owner(&mut self, water_account_id: impl Into<String>) {
        self.water_account_id = water_account_id.into();
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meter() -> WaterMeter {
        WaterMeter::new(
            "WM-1",
            "Main house meter",
            "WA-1",
            MeasurementUnit::Liters,
            WaterPoint {
                name: "Parcel 12".to_string(),
                location: "Carrer Major 12".to_string(),
                fixed_population: 5,
                floating_population: 3,
                cadastral_reference: "9872023VH5797S".to_string(),
                community_zone_id: "CZ-1".to_string(),
                notes: None,
            },
        )
    }

    #[test]
    fn new_meter_is_active_without_snapshot() {
        let meter = sample_meter();
        assert!(meter.is_active);
        assert!(!meter.has_last_reading());
        assert!(meter.last_reading_date.is_none());
        assert!(meter.last_reading_excess_consumption.is_none());
    }

    #[test]
    fn snapshot_fields_move_together() {
        let mut meter = sample_meter();
        meter.set_last_reading(18000.0, Utc::now(), true);
        assert_eq!(meter.last_reading_normalized_value, Some(18000.0));
        assert_eq!(meter.last_reading_excess_consumption, Some(true));
        assert!(meter.last_reading_date.is_some());

        meter.clear_last_reading();
        assert!(meter.last_reading_normalized_value.is_none());
        assert!(meter.last_reading_date.is_none());
        assert!(meter.last_reading_excess_consumption.is_none());
    }

    #[test]
    fn total_population_sums_fixed_and_floating() {
        assert_eq!(sample_meter().water_point.total_population(), 8);
    }

    #[test]
    fn deactivate_flips_flag() {
        let mut meter = sample_meter();
        meter.deactivate();
        assert!(!meter.is_active);
    }
}
