//! Community entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "communities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Limit rule shape: PERSON_BASED or HOUSEHOLD_BASED
    pub limit_rule_type: String,

    /// Liters per day (per person or per household)
    #[sea_orm(column_type = "Double")]
    pub limit_rule_value: f64,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::community_zone::Entity")]
    CommunityZones,
}

impl Related<super::community_zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommunityZones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
