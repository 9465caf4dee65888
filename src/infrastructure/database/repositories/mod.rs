//! SeaORM repository implementations

pub mod community_lookup;
pub mod community_repository;
pub mod image_repository;
pub mod repository_provider;
pub mod water_account_repository;
pub mod water_meter_reading_repository;
pub mod water_meter_repository;

pub use community_lookup::SeaOrmCommunityLookup;
pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("database error: {}", e))
}
