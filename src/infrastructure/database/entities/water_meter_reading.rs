//! Water meter reading entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "water_meter_readings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub water_meter_id: String,

    /// Raw value as reported, stored as an exact decimal string
    pub reading: String,

    /// Raw value converted to liters
    #[sea_orm(column_type = "Double")]
    pub normalized_reading: f64,

    pub reading_date: DateTimeUtc,

    #[sea_orm(nullable)]
    pub notes: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::water_meter::Entity",
        from = "Column::WaterMeterId",
        to = "super::water_meter::Column::Id"
    )]
    WaterMeter,

    #[sea_orm(has_one = "super::water_meter_reading_image::Entity")]
    Image,
}

impl Related<super::water_meter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WaterMeter.def()
    }
}

impl Related<super::water_meter_reading_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
