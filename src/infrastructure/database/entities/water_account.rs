//! Water account entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "water_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// National identity document of the holder
    pub national_id: String,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::water_meter::Entity")]
    WaterMeters,
}

impl Related<super::water_meter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WaterMeters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
