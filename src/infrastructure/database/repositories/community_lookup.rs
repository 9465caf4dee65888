//! SeaORM-backed implementation of the rule lookup contract

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::db_err;
use crate::domain::{
    CommunityInfo, CommunityLookup, CommunityZoneInfo, ConsumptionLimitRule, DomainError,
    DomainResult, LimitRuleType, WaterPointInfo,
};
use crate::infrastructure::database::entities::{community, community_zone, water_meter};

/// Resolves the water point → zone → community chain against the service's
/// own tables. The water point record lives embedded in the meter row.
pub struct SeaOrmCommunityLookup {
    db: DatabaseConnection,
}

impl SeaOrmCommunityLookup {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommunityLookup for SeaOrmCommunityLookup {
    async fn find_water_point(&self, meter_id: &str) -> DomainResult<WaterPointInfo> {
        let meter = water_meter::Entity::find_by_id(meter_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "WaterPoint",
                field: "meter_id",
                value: meter_id.to_string(),
            })?;
        Ok(WaterPointInfo {
            fixed_population: meter.fixed_population,
            floating_population: meter.floating_population,
            community_zone_id: meter.community_zone_id,
        })
    }

    async fn find_community_zone(&self, zone_id: &str) -> DomainResult<CommunityZoneInfo> {
        let zone = community_zone::Entity::find_by_id(zone_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "CommunityZone",
                field: "id",
                value: zone_id.to_string(),
            })?;
        Ok(CommunityZoneInfo {
            community_id: zone.community_id,
        })
    }

    async fn find_community(&self, community_id: &str) -> DomainResult<CommunityInfo> {
        let community = community::Entity::find_by_id(community_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Community",
                field: "id",
                value: community_id.to_string(),
            })?;
        let rule_type = LimitRuleType::from_str(&community.limit_rule_type).ok_or_else(|| {
            DomainError::Storage(format!(
                "unknown limit rule type '{}'",
                community.limit_rule_type
            ))
        })?;
        Ok(CommunityInfo {
            limit_rule: ConsumptionLimitRule {
                rule_type,
                value: community.limit_rule_value,
            },
        })
    }
}
