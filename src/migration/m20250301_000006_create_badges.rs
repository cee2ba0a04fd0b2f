//! Migration: Create badges table.
//!
//! Badge names are globally unique and each station carries at most one
//! badge; both rules surface as conflicts through the constraint translator.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Badges::Table)
                    .col(pk_uuid(Badges::Id))
                    .col(string(Badges::Name))
                    .col(string_null(Badges::Description))
                    .col(uuid(Badges::StationId))
                    .col(timestamp_with_time_zone(Badges::CreatedAt))
                    .col(timestamp_with_time_zone(Badges::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_badges_station_id")
                            .from(Badges::Table, Badges::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_badges_name")
                    .table(Badges::Table)
                    .col(Badges::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_badges_station_id")
                    .table(Badges::Table)
                    .col(Badges::StationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Badges::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Badges {
    Table,
    Id,
    Name,
    Description,
    StationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Stations {
    Table,
    Id,
}
