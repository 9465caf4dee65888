//! Create community_zones table

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_communities::Communities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommunityZones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommunityZones::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommunityZones::CommunityId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CommunityZones::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_community_zones_community")
                            .from(CommunityZones::Table, CommunityZones::CommunityId)
                            .to(Communities::Table, Communities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_community_zones_community")
                    .table(CommunityZones::Table)
                    .col(CommunityZones::CommunityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommunityZones::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CommunityZones {
    Table,
    Id,
    CommunityId,
    Name,
}
