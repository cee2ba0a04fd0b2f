//! Migration: Create instructors table.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .col(pk_uuid(Instructors::Id))
                    .col(uuid(Instructors::UserId))
                    .col(uuid(Instructors::StationId))
                    .col(timestamp_with_time_zone(Instructors::CreatedAt))
                    .col(timestamp_with_time_zone(Instructors::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instructors_user_id")
                            .from(Instructors::Table, Instructors::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instructors_station_id")
                            .from(Instructors::Table, Instructors::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_instructors_user_id_station_id")
                    .table(Instructors::Table)
                    .col(Instructors::UserId)
                    .col(Instructors::StationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Instructors {
    Table,
    Id,
    UserId,
    StationId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Stations {
    Table,
    Id,
}
