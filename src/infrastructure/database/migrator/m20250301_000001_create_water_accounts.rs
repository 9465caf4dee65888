//! Create water_accounts table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WaterAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaterAccounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WaterAccounts::Name).string().not_null())
                    .col(
                        ColumnDef::new(WaterAccounts::NationalId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaterAccounts::Notes).string())
                    .col(
                        ColumnDef::new(WaterAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterAccounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WaterAccounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum WaterAccounts {
    Table,
    Id,
    Name,
    NationalId,
    Notes,
    CreatedAt,
    UpdatedAt,
}
