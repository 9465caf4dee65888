//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_water_accounts;
mod m20250301_000002_create_communities;
mod m20250301_000003_create_community_zones;
mod m20250301_000004_create_water_meters;
mod m20250301_000005_create_water_meter_readings;
mod m20250301_000006_create_water_meter_images;
mod m20250301_000007_create_water_meter_reading_images;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_water_accounts::Migration),
            Box::new(m20250301_000002_create_communities::Migration),
            Box::new(m20250301_000003_create_community_zones::Migration),
            Box::new(m20250301_000004_create_water_meters::Migration),
            Box::new(m20250301_000005_create_water_meter_readings::Migration),
            Box::new(m20250301_000006_create_water_meter_images::Migration),
            Box::new(m20250301_000007_create_water_meter_reading_images::Migration),
        ]
    }
}
