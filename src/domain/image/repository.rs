//! Image repository interfaces

use async_trait::async_trait;

use super::model::{WaterMeterImage, WaterMeterReadingImage};
use crate::domain::DomainResult;

#[async_trait]
pub trait WaterMeterImageRepository: Send + Sync {
    async fn save(&self, image: WaterMeterImage) -> DomainResult<()>;
    async fn find_by_meter(&self, meter_id: &str) -> DomainResult<Option<WaterMeterImage>>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

#[async_trait]
pub trait WaterMeterReadingImageRepository: Send + Sync {
    async fn save(&self, image: WaterMeterReadingImage) -> DomainResult<()>;
    async fn find_by_reading(
        &self,
        reading_id: &str,
    ) -> DomainResult<Option<WaterMeterReadingImage>>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
