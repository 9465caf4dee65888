//! Create water_meter_reading_images table

use sea_orm_migration::prelude::*;

use super::m20250301_000005_create_water_meter_readings::WaterMeterReadings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WaterMeterReadingImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaterMeterReadingImages::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadingImages::WaterMeterReadingId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadingImages::Url)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadingImages::FileName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadingImages::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadingImages::MimeType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadingImages::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterReadingImages::ExternalKey)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_water_meter_reading_images_reading")
                            .from(
                                WaterMeterReadingImages::Table,
                                WaterMeterReadingImages::WaterMeterReadingId,
                            )
                            .to(WaterMeterReadings::Table, WaterMeterReadings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(WaterMeterReadingImages::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
pub enum WaterMeterReadingImages {
    Table,
    Id,
    WaterMeterReadingId,
    Url,
    FileName,
    FileSize,
    MimeType,
    UploadedAt,
    ExternalKey,
}
