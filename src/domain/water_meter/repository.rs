//! Water meter repository interface

use async_trait::async_trait;

use super::model::WaterMeter;
use crate::domain::DomainResult;

#[async_trait]
pub trait WaterMeterRepository: Send + Sync {
    async fn save(&self, meter: WaterMeter) -> DomainResult<()>;
    async fn update(&self, meter: WaterMeter) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<WaterMeter>>;
    async fn find_by_account(&self, water_account_id: &str) -> DomainResult<Vec<WaterMeter>>;
    async fn find_all(&self) -> DomainResult<Vec<WaterMeter>>;
}
