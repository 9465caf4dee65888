//! Water meter device photo entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "water_meter_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// One photo per meter
    #[sea_orm(unique)]
    pub water_meter_id: String,

    pub url: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub uploaded_at: DateTimeUtc,

    /// Key in the external file store
    pub external_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::water_meter::Entity",
        from = "Column::WaterMeterId",
        to = "super::water_meter::Column::Id"
    )]
    WaterMeter,
}

impl Related<super::water_meter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WaterMeter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
