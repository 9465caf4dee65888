//! Repository provider for the domain layer

use super::community::{CommunityRepository, CommunityZoneRepository};
use super::image::{WaterMeterImageRepository, WaterMeterReadingImageRepository};
use super::water_account::WaterAccountRepository;
use super::water_meter::WaterMeterRepository;
use super::water_meter_reading::WaterMeterReadingRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let meter = repos.water_meters().find_by_id("WM-1").await?;
///     let last = repos.readings().find_last_reading("WM-1").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn water_accounts(&self) -> &dyn WaterAccountRepository;
    fn water_meters(&self) -> &dyn WaterMeterRepository;
    fn readings(&self) -> &dyn WaterMeterReadingRepository;
    fn meter_images(&self) -> &dyn WaterMeterImageRepository;
    fn reading_images(&self) -> &dyn WaterMeterReadingImageRepository;
    fn communities(&self) -> &dyn CommunityRepository;
    fn community_zones(&self) -> &dyn CommunityZoneRepository;
}
