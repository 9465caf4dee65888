//! Create water_meter_readings table

use sea_orm_migration::prelude::*;

use super::m20250301_000004_create_water_meters::WaterMeters;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WaterMeterReadings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaterMeterReadings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadings::WaterMeterId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadings::Reading)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadings::NormalizedReading)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadings::ReadingDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaterMeterReadings::Notes).string())
                    .col(
                        ColumnDef::new(WaterMeterReadings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_water_meter_readings_meter")
                            .from(WaterMeterReadings::Table, WaterMeterReadings::WaterMeterId)
                            .to(WaterMeters::Table, WaterMeters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The edit/delete window and the snapshot recomputation are all
        // top-N-by-date queries over one meter.
        manager
            .create_index(
                Index::create()
                    .name("idx_water_meter_readings_meter_date")
                    .table(WaterMeterReadings::Table)
                    .col(WaterMeterReadings::WaterMeterId)
                    .col(WaterMeterReadings::ReadingDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WaterMeterReadings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum WaterMeterReadings {
    Table,
    Id,
    WaterMeterId,
    Reading,
    NormalizedReading,
    ReadingDate,
    Notes,
    CreatedAt,
}
