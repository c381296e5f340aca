//! Migration: Create projects table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(Projects::Title).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Projects::ManagerId).string_len(64).not_null())
                    .col(ColumnDef::new(Projects::StartedAt).date().not_null())
                    .col(ColumnDef::new(Projects::FinishedAt).date().not_null())
                    .to_owned(),
            )
            .await?;

        // References are not enforced, only indexed for lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_manager_id")
                    .table(Projects::Table)
                    .col(Projects::ManagerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    ManagerId,
    StartedAt,
    FinishedAt,
}
