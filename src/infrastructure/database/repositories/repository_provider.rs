//! SeaORM-backed RepositoryProvider

use sea_orm::DatabaseConnection;

use super::community_repository::{SeaOrmCommunityRepository, SeaOrmCommunityZoneRepository};
use super::image_repository::{
    SeaOrmWaterMeterImageRepository, SeaOrmWaterMeterReadingImageRepository,
};
use super::water_account_repository::SeaOrmWaterAccountRepository;
use super::water_meter_reading_repository::SeaOrmWaterMeterReadingRepository;
use super::water_meter_repository::SeaOrmWaterMeterRepository;
use crate::domain::{
    CommunityRepository, CommunityZoneRepository, RepositoryProvider, WaterAccountRepository,
    WaterMeterImageRepository, WaterMeterReadingImageRepository, WaterMeterReadingRepository,
    WaterMeterRepository,
};

pub struct SeaOrmRepositoryProvider {
    water_accounts: SeaOrmWaterAccountRepository,
    water_meters: SeaOrmWaterMeterRepository,
    readings: SeaOrmWaterMeterReadingRepository,
    meter_images: SeaOrmWaterMeterImageRepository,
    reading_images: SeaOrmWaterMeterReadingImageRepository,
    communities: SeaOrmCommunityRepository,
    community_zones: SeaOrmCommunityZoneRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            water_accounts: SeaOrmWaterAccountRepository::new(db.clone()),
            water_meters: SeaOrmWaterMeterRepository::new(db.clone()),
            readings: SeaOrmWaterMeterReadingRepository::new(db.clone()),
            meter_images: SeaOrmWaterMeterImageRepository::new(db.clone()),
            reading_images: SeaOrmWaterMeterReadingImageRepository::new(db.clone()),
            communities: SeaOrmCommunityRepository::new(db.clone()),
            community_zones: SeaOrmCommunityZoneRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn water_accounts(&self) -> &dyn WaterAccountRepository {
        &self.water_accounts
    }

    fn water_meters(&self) -> &dyn WaterMeterRepository {
        &self.water_meters
    }

    fn readings(&self) -> &dyn WaterMeterReadingRepository {
        &self.readings
    }

    fn meter_images(&self) -> &dyn WaterMeterImageRepository {
        &self.meter_images
    }

    fn reading_images(&self) -> &dyn WaterMeterReadingImageRepository {
        &self.reading_images
    }

    fn communities(&self) -> &dyn CommunityRepository {
        &self.communities
    }

    fn community_zones(&self) -> &dyn CommunityZoneRepository {
        &self.community_zones
    }
}
