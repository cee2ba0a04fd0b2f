//! Migration: Create admin_logs table.
//!
//! Append-only; there is no update or delete path.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminLogs::Table)
                    .col(pk_uuid(AdminLogs::Id))
                    .col(uuid(AdminLogs::UserId))
                    .col(string(AdminLogs::Log))
                    .col(timestamp_with_time_zone(AdminLogs::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_logs_user_id")
                            .from(AdminLogs::Table, AdminLogs::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admin_logs_user_id")
                    .table(AdminLogs::Table)
                    .col(AdminLogs::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminLogs {
    Table,
    Id,
    UserId,
    Log,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
