//! Migration: Create user_membership_levels table.
//!
//! At most one level per user, enforced by a unique index on user_id.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserMembershipLevels::Table)
                    .col(pk_uuid(UserMembershipLevels::Id))
                    .col(uuid(UserMembershipLevels::UserId))
                    .col(uuid(UserMembershipLevels::MembershipLevelId))
                    .col(timestamp_with_time_zone(UserMembershipLevels::CreatedAt))
                    .col(timestamp_with_time_zone(UserMembershipLevels::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_membership_levels_user_id")
                            .from(UserMembershipLevels::Table, UserMembershipLevels::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_membership_levels_membership_level_id")
                            .from(
                                UserMembershipLevels::Table,
                                UserMembershipLevels::MembershipLevelId,
                            )
                            .to(MembershipLevels::Table, MembershipLevels::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_membership_levels_user_id")
                    .table(UserMembershipLevels::Table)
                    .col(UserMembershipLevels::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserMembershipLevels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserMembershipLevels {
    Table,
    Id,
    UserId,
    MembershipLevelId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum MembershipLevels {
    Table,
    Id,
}
