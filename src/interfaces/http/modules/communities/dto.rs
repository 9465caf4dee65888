//! Community DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Community, CommunityZone, DomainError, DomainResult, LimitRuleType};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// PERSON_BASED or HOUSEHOLD_BASED
    #[validate(length(min = 1))]
    pub limit_rule_type: String,
    /// Liters per day
    #[validate(range(min = 0.0))]
    pub limit_rule_value: f64,
}

impl CreateCommunityRequest {
    pub fn parse_rule_type(&self) -> DomainResult<LimitRuleType> {
        LimitRuleType::from_str(&self.limit_rule_type).ok_or_else(|| {
            DomainError::Validation(format!(
                "'{}' is not a limit rule type (PERSON_BASED | HOUSEHOLD_BASED)",
                self.limit_rule_type
            ))
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommunityDto {
    pub id: String,
    pub name: String,
    pub limit_rule_type: String,
    pub limit_rule_value: f64,
    pub created_at: DateTime<Utc>,
}

impl CommunityDto {
    pub fn from_domain(community: Community) -> Self {
        Self {
            id: community.id,
            name: community.name,
            limit_rule_type: community.limit_rule.rule_type.as_str().to_string(),
            limit_rule_value: community.limit_rule.value,
            created_at: community.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommunityZoneRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommunityZoneDto {
    pub id: String,
    pub community_id: String,
    pub name: String,
}

impl CommunityZoneDto {
    pub fn from_domain(zone: CommunityZone) -> Self {
        Self {
            id: zone.id,
            community_id: zone.community_id,
            name: zone.name,
        }
    }
}
