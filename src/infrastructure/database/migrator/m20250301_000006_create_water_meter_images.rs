//! Create water_meter_images table

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
                    .table(WaterMeterImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaterMeterImages::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterImages::WaterMeterId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WaterMeterImages::Url).string().not_null())
                    .col(
                        ColumnDef::new(WaterMeterImages::FileName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterImages::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterImages::MimeType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterImages::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterMeterImages::ExternalKey)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_water_meter_images_meter")
                            .from(WaterMeterImages::Table, WaterMeterImages::WaterMeterId)
                            .to(WaterMeters::Table, WaterMeters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WaterMeterImages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum WaterMeterImages {
    Table,
    Id,
    WaterMeterId,
    Url,
    FileName,
    FileSize,
    MimeType,
    UploadedAt,
    ExternalKey,
}
