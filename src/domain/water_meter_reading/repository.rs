//! Water meter reading repository interface

use async_trait::async_trait;

use super::model::WaterMeterReading;
use crate::domain::DomainResult;

#[async_trait]
pub trait WaterMeterReadingRepository: Send + Sync {
    async fn save(&self, reading: WaterMeterReading) -> DomainResult<()>;
    async fn update(&self, reading: WaterMeterReading) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterMeterReading>>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
    /// Most recent reading of a meter, by reading date.
    async fn find_last_reading(&self, meter_id: &str) -> DomainResult<Option<WaterMeterReading>>;
    /// Up to `n` most recent readings of a meter, newest first.
    async fn find_most_recent(&self, meter_id: &str, n: u64)
        -> DomainResult<Vec<WaterMeterReading>>;
    /// Full history of a meter, newest first.
    async fn find_by_meter(&self, meter_id: &str) -> DomainResult<Vec<WaterMeterReading>>;
}
