//! Water meter entity
//!
//! The water point is embedded as flattened columns; the `last_reading_*`
//! triple is the denormalized snapshot maintained by the recalculation
//! engine and is always written as a unit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "water_meters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub water_account_id: String,

    /// Declared unit: L or M3
    pub measurement_unit: String,

    // Embedded water point

    pub water_point_name: String,
    pub location: String,
    pub fixed_population: i32,
    pub floating_population: i32,
    pub cadastral_reference: String,
    pub community_zone_id: String,

    #[sea_orm(nullable)]
    pub water_point_notes: Option<String>,

    pub is_active: bool,

    // Denormalized last-reading snapshot

    #[sea_orm(nullable, column_type = "Double")]
    pub last_reading_normalized_value: Option<f64>,

    #[sea_orm(nullable)]
    pub last_reading_date: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub last_reading_excess_consumption: Option<bool>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::water_account::Entity",
        from = "Column::WaterAccountId",
        to = "super::water_account::Column::Id"
    )]
    WaterAccount,

    #[sea_orm(
        belongs_to = "super::community_zone::Entity",
        from = "Column::CommunityZoneId",
        to = "super::community_zone::Column::Id"
    )]
    CommunityZone,

    #[sea_orm(has_many = "super::water_meter_reading::Entity")]
    Readings,
}

impl Related<super::water_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WaterAccount.def()
    }
}

impl Related<super::water_meter_reading::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Readings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
