//! Create communities table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Communities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Communities::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Communities::Name).string().not_null())
                    .col(
                        ColumnDef::new(Communities::LimitRuleType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Communities::LimitRuleValue)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Communities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Communities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Communities {
    Table,
    Id,
    Name,
    LimitRuleType,
    LimitRuleValue,
    CreatedAt,
}
