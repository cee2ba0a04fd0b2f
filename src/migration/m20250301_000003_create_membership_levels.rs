//! Migration: Create membership_levels table.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MembershipLevels::Table)
                    .col(pk_uuid(MembershipLevels::Id))
                    .col(string(MembershipLevels::Name))
                    .col(big_integer(MembershipLevels::AmountInCents))
                    .col(timestamp_with_time_zone(MembershipLevels::CreatedAt))
                    .col(timestamp_with_time_zone(MembershipLevels::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_membership_levels_name")
                    .table(MembershipLevels::Table)
                    .col(MembershipLevels::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MembershipLevels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MembershipLevels {
    Table,
    Id,
    Name,
    AmountInCents,
    CreatedAt,
    UpdatedAt,
}
