pub mod community;
pub mod error;
pub mod image;
pub mod measurement_unit;
pub mod repositories;
pub mod water_account;
pub mod water_meter;
pub mod water_meter_reading;

// Re-export commonly used types
pub use community::{
    Community, CommunityInfo, CommunityLookup, CommunityRepository, CommunityZone,
    CommunityZoneInfo, CommunityZoneRepository, ConsumptionLimitRule, LimitRuleType,
    WaterPointInfo,
};
pub use error::{DomainError, DomainResult};
pub use image::{
    FileStorage, StorageError, StoredObject, WaterMeterImage, WaterMeterImageRepository,
    WaterMeterReadingImage, WaterMeterReadingImageRepository,
};
pub use measurement_unit::MeasurementUnit;
pub use repositories::RepositoryProvider;
pub use water_account::{WaterAccount, WaterAccountRepository};
pub use water_meter::{WaterMeter, WaterMeterRepository, WaterPoint};
pub use water_meter_reading::{WaterMeterReading, WaterMeterReadingRepository};
