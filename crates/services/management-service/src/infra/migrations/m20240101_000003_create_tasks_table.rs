//! Migration: Create tasks table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tasks::Id).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(Tasks::Title).string().not_null())
                    .col(ColumnDef::new(Tasks::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Tasks::Priority).string_len(16).not_null())
                    .col(ColumnDef::new(Tasks::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Tasks::CreatedAt).date().not_null())
                    .col(ColumnDef::new(Tasks::DoneAt).date().not_null())
                    .col(ColumnDef::new(Tasks::AuthorId).string_len(64).not_null())
                    .col(ColumnDef::new(Tasks::ProjectId).string_len(64).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_author_id")
                    .table(Tasks::Table)
                    .col(Tasks::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_project_id")
                    .table(Tasks::Table)
                    .col(Tasks::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Priority,
    Status,
    CreatedAt,
    DoneAt,
    AuthorId,
    ProjectId,
}
