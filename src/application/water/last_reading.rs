//! Last reading recalculation engine
//!
//! Single writer of the meter's denormalized last-reading snapshot. Every
//! reading mutation path routes through `refresh` (or `clear` once the log
//! is empty) instead of recomputing inline.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CommunityLookup, DomainError, DomainResult, RepositoryProvider, WaterMeter,
    WaterMeterReading,
};

/// A meter's first-ever reading is amortized over a year when computing the
/// daily rate.
const BOOTSTRAP_AMORTIZATION_DAYS: f64 = 365.0;

pub struct LastReadingUpdater {
    repos: Arc<dyn RepositoryProvider>,
    lookup: Arc<dyn CommunityLookup>,
}

impl LastReadingUpdater {
    pub fn new(repos: Arc<dyn RepositoryProvider>, lookup: Arc<dyn CommunityLookup>) -> Self {
        Self { repos, lookup }
    }

    /// Recompute and persist the snapshot from the supplied readings
    /// (expected: the meter's two most recent), returning the updated meter.
    pub async fn refresh(
        &self,
        mut meter: WaterMeter,
        readings: &[WaterMeterReading],
    ) -> DomainResult<WaterMeter> {
        if readings.is_empty() {
            return Err(DomainError::NoReadingsProvided);
        }

        let mut ordered: Vec<&WaterMeterReading> = readings.iter().collect();
        ordered.sort_by(|a, b| b.reading_date.cmp(&a.reading_date));
        let latest = ordered[0];
        let second_latest = ordered.get(1).copied();

        let water_point = self.lookup.find_water_point(&meter.id).await?;
        let zone = self
            .lookup
            .find_community_zone(&water_point.community_zone_id)
            .await?;
        let community = self.lookup.find_community(&zone.community_id).await?;

        let limit_per_day = community.limit_rule.limit_per_day(
            water_point.fixed_population,
            water_point.floating_population,
        );

        let daily_consumption = match second_latest {
            None => latest.normalized_reading / BOOTSTRAP_AMORTIZATION_DAYS,
            Some(previous) => {
                let days = (latest.reading_date - previous.reading_date).num_days();
                if days <= 0 {
                    return Err(DomainError::NonPositiveInterval { days });
                }
                // Absolute normalized value over the interval, not the
                // delta between the two readings.
                latest.normalized_reading / days as f64
            }
        };

        // Strictly greater: consuming exactly the limit is not excess.
        let excess = daily_consumption > limit_per_day;

        meter.set_last_reading(latest.normalized_reading, latest.reading_date, excess);
        self.repos.water_meters().update(meter.clone()).await?;

        info!(
            meter_id = %meter.id,
            daily_consumption,
            limit_per_day,
            excess,
            "Last reading snapshot refreshed"
        );

        Ok(meter)
    }

    /// Clear the snapshot once no readings remain.
    pub async fn clear(&self, mut meter: WaterMeter) -> DomainResult<WaterMeter> {
        meter.clear_last_reading();
        self.repos.water_meters().update(meter.clone()).await?;
        info!(meter_id = %meter.id, "Last reading snapshot cleared");
        Ok(meter)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::water::testing::{
        meter_with_population, reading_days_ago, repos_with_rule, InMemoryLookup,
    };
    use crate::domain::LimitRuleType;

    async fn snapshot_of(repos: &dyn RepositoryProvider, meter_id: &str) -> WaterMeter {
        repos
            .water_meters()
            .find_by_id(meter_id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn first_reading_amortizes_over_a_year() {
        // Population 5+3=8, person-based 50 L/day → limit 400/day.
        let repos = repos_with_rule(LimitRuleType::PersonBased, 50.0).await;
        let meter = meter_with_population(&repos, "WM-1", 5, 3).await;
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let updater = LastReadingUpdater::new(repos.clone(), lookup);

        let latest = reading_days_ago("WM-1", 10_000.0, 0);
        updater.refresh(meter, &[latest]).await.unwrap();

        let meter = snapshot_of(repos.as_ref(), "WM-1").await;
        // 10000 / 365 ≈ 27.4 < 400
        assert_eq!(meter.last_reading_normalized_value, Some(10_000.0));
        assert_eq!(meter.last_reading_excess_consumption, Some(false));
        assert!(meter.last_reading_date.is_some());
    }

    #[tokio::test]
    async fn interval_rate_above_limit_is_excess() {
        // Population 15, person-based 100 → limit 1500/day.
        let repos = repos_with_rule(LimitRuleType::PersonBased, 100.0).await;
        let meter = meter_with_population(&repos, "WM-1", 15, 0).await;
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let updater = LastReadingUpdater::new(repos.clone(), lookup);

        let previous = reading_days_ago("WM-1", 1_000.0, 10);
        let latest = reading_days_ago("WM-1", 18_000.0, 0);
        // Supplied unordered on purpose; the engine sorts by date itself.
        updater.refresh(meter, &[previous, latest]).await.unwrap();

        let meter = snapshot_of(repos.as_ref(), "WM-1").await;
        // 18000 / 10 = 1800 > 1500
        assert_eq!(meter.last_reading_normalized_value, Some(18_000.0));
        assert_eq!(meter.last_reading_excess_consumption, Some(true));
    }

    #[tokio::test]
    async fn rate_equal_to_limit_is_not_excess() {
        let repos = repos_with_rule(LimitRuleType::PersonBased, 100.0).await;
        let meter = meter_with_population(&repos, "WM-1", 15, 0).await;
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let updater = LastReadingUpdater::new(repos.clone(), lookup);

        let previous = reading_days_ago("WM-1", 1_000.0, 10);
        let latest = reading_days_ago("WM-1", 15_000.0, 0);
        updater.refresh(meter, &[latest, previous]).await.unwrap();

        let meter = snapshot_of(repos.as_ref(), "WM-1").await;
        // 15000 / 10 = 1500, not > 1500
        assert_eq!(meter.last_reading_excess_consumption, Some(false));
    }

    #[tokio::test]
    async fn household_rule_ignores_population() {
        let repos = repos_with_rule(LimitRuleType::HouseholdBased, 100.0).await;
        let meter = meter_with_population(&repos, "WM-1", 40, 10).await;
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let updater = LastReadingUpdater::new(repos.clone(), lookup);

        let previous = reading_days_ago("WM-1", 0.0, 10);
        let latest = reading_days_ago("WM-1", 1_010.0, 0);
        updater.refresh(meter, &[latest, previous]).await.unwrap();

        let meter = snapshot_of(repos.as_ref(), "WM-1").await;
        // 101/day against a flat 100/day household limit
        assert_eq!(meter.last_reading_excess_consumption, Some(true));
    }

    #[tokio::test]
    async fn no_readings_is_rejected() {
        let repos = repos_with_rule(LimitRuleType::PersonBased, 50.0).await;
        let meter = meter_with_population(&repos, "WM-1", 1, 0).await;
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let updater = LastReadingUpdater::new(repos, lookup);

        let err = updater.refresh(meter, &[]).await.unwrap_err();
        assert!(matches!(err, DomainError::NoReadingsProvided));
    }

    #[tokio::test]
    async fn same_day_readings_are_rejected() {
        let repos = repos_with_rule(LimitRuleType::PersonBased, 50.0).await;
        let meter = meter_with_population(&repos, "WM-1", 1, 0).await;
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let updater = LastReadingUpdater::new(repos, lookup);

        let a = reading_days_ago("WM-1", 100.0, 0);
        let mut b = reading_days_ago("WM-1", 200.0, 0);
        b.reading_date = a.reading_date + chrono::Duration::hours(2);

        let err = updater.refresh(meter, &[a, b]).await.unwrap_err();
        assert!(matches!(err, DomainError::NonPositiveInterval { days: 0 }));
    }

    #[tokio::test]
    async fn missing_community_link_is_not_found() {
        let repos = repos_with_rule(LimitRuleType::PersonBased, 50.0).await;
        let meter = meter_with_population(&repos, "WM-1", 1, 0).await;
        // Break the zone → community link.
        repos.zones.lock().unwrap().clear();
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let updater = LastReadingUpdater::new(repos.clone(), lookup);

        let latest = reading_days_ago("WM-1", 100.0, 0);
        let err = updater.refresh(meter, &[latest]).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        // And the snapshot stays untouched.
        let meter = snapshot_of(repos.as_ref(), "WM-1").await;
        assert!(!meter.has_last_reading());
    }

    #[tokio::test]
    async fn clear_empties_the_snapshot() {
        let repos = repos_with_rule(LimitRuleType::PersonBased, 50.0).await;
        let mut meter = meter_with_population(&repos, "WM-1", 1, 0).await;
        meter.set_last_reading(500.0, chrono::Utc::now(), false);
        repos.water_meters().update(meter.clone()).await.unwrap();
        let lookup = Arc::new(InMemoryLookup::new(repos.clone()));
        let updater = LastReadingUpdater::new(repos.clone(), lookup);

        updater.clear(meter).await.unwrap();

        let meter = snapshot_of(repos.as_ref(), "WM-1").await;
        assert!(!meter.has_last_reading());
        assert!(meter.last_reading_date.is_none());
        assert!(meter.last_reading_excess_consumption.is_none());
    }
}
