//! Create water_meters table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_water_accounts::WaterAccounts;
use super::m20250301_000003_create_community_zones::CommunityZones;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WaterMeters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaterMeters::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WaterMeters::Name).string().not_null())
                    .col(
                        ColumnDef::new(WaterMeters::WaterAccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeters::MeasurementUnit)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeters::WaterPointName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaterMeters::Location).string().not_null())
                    .col(
                        ColumnDef::new(WaterMeters::FixedPopulation)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeters::FloatingPopulation)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeters::CadastralReference)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeters::CommunityZoneId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaterMeters::WaterPointNotes).string())
                    .col(
                        ColumnDef::new(WaterMeters::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(WaterMeters::LastReadingNormalizedValue).double())
                    .col(
                        ColumnDef::new(WaterMeters::LastReadingDate).timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(WaterMeters::LastReadingExcessConsumption).boolean())
                    .col(
                        ColumnDef::new(WaterMeters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_water_meters_account")
                            .from(WaterMeters::Table, WaterMeters::WaterAccountId)
                            .to(WaterAccounts::Table, WaterAccounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_water_meters_community_zone")
                            .from(WaterMeters::Table, WaterMeters::CommunityZoneId)
                            .to(CommunityZones::Table, CommunityZones::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_water_meters_account")
                    .table(WaterMeters::Table)
                    .col(WaterMeters::WaterAccountId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WaterMeters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum WaterMeters {
    Table,
    Id,
    Name,
    WaterAccountId,
    MeasurementUnit,
    WaterPointName,
    Location,
    FixedPopulation,
    FloatingPopulation,
    CadastralReference,
    CommunityZoneId,
    WaterPointNotes,
    IsActive,
    LastReadingNormalizedValue,
    LastReadingDate,
    LastReadingExcessConsumption,
    CreatedAt,
    UpdatedAt,
}
