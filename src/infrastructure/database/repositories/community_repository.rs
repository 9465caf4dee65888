//! SeaORM implementations of the community repositories

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    Community, CommunityRepository, CommunityZone, CommunityZoneRepository,
    ConsumptionLimitRule, DomainError, DomainResult, LimitRuleType,
};
use crate::infrastructure::database::entities::{community, community_zone};

pub struct SeaOrmCommunityRepository {
    db: DatabaseConnection,
}

impl SeaOrmCommunityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn community_to_domain(m: community::Model) -> DomainResult<Community> {
    let rule_type = LimitRuleType::from_str(&m.limit_rule_type).ok_or_else(|| {
        DomainError::Storage(format!("unknown limit rule type '{}'", m.limit_rule_type))
    })?;
    Ok(Community {
        id: m.id,
        name: m.name,
        limit_rule: ConsumptionLimitRule {
            rule_type,
            value: m.limit_rule_value,
        },
        created_at: m.created_at,
    })
}

#[async_trait]
impl CommunityRepository for SeaOrmCommunityRepository {
    async fn save(&self, community: Community) -> DomainResult<()> {
        debug!("Saving community: {}", community.id);
        let model = community::ActiveModel {
            id: Set(community.id),
            name: Set(community.name),
            limit_rule_type: Set(community.limit_rule.rule_type.as_str().to_string()),
            limit_rule_value: Set(community.limit_rule.value),
            created_at: Set(community.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Community>> {
        let model = community::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(community_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Community>> {
        let models = community::Entity::find()
            .order_by_asc(community::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(community_to_domain).collect()
    }
}

pub struct SeaOrmCommunityZoneRepository {
    db: DatabaseConnection,
}

impl SeaOrmCommunityZoneRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn zone_to_domain(m: community_zone::Model) -> CommunityZone {
    CommunityZone {
        id: m.id,
        community_id: m.community_id,
        name: m.name,
    }
}

#[async_trait]
impl CommunityZoneRepository for SeaOrmCommunityZoneRepository {
    async fn save(&self, zone: CommunityZone) -> DomainResult<()> {
        debug!("Saving community zone: {}", zone.id);
        let model = community_zone::ActiveModel {
            id: Set(zone.id),
            community_id: Set(zone.community_id),
            name: Set(zone.name),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<CommunityZone>> {
        let model = community_zone::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(zone_to_domain))
    }

    async fn find_by_community(&self, community_id: &str) -> DomainResult<Vec<CommunityZone>> {
        let models = community_zone::Entity::find()
            .filter(community_zone::Column::CommunityId.eq(community_id))
            .order_by_asc(community_zone::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(zone_to_domain).collect())
    }
}
