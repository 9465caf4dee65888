//! Rule lookup contract consumed by the recalculation engine
//!
//! The engine never touches community tables directly; it resolves the
//! water point → community zone → community chain through this trait, and
//! any missing link is a not-found failure.

use async_trait::async_trait;

use super::model::ConsumptionLimitRule;
use crate::domain::DomainResult;

/// Water point data relevant to limit computation
#[derive(Debug, Clone)]
pub struct WaterPointInfo {
    pub fixed_population: i32,
    pub floating_population: i32,
    pub community_zone_id: String,
}

/// Community zone link
#[derive(Debug, Clone)]
pub struct CommunityZoneInfo {
    pub community_id: String,
}

/// Community data relevant to limit computation
#[derive(Debug, Clone)]
pub struct CommunityInfo {
    pub limit_rule: ConsumptionLimitRule,
}

#[async_trait]
pub trait CommunityLookup: Send + Sync {
    /// Water point a meter is installed at, keyed by meter id (the water
    /// point record lives embedded in the meter).
    async fn find_water_point(&self, meter_id: &str) -> DomainResult<WaterPointInfo>;
    async fn find_community_zone(&self, zone_id: &str) -> DomainResult<CommunityZoneInfo>;
    async fn find_community(&self, community_id: &str) -> DomainResult<CommunityInfo>;
}
