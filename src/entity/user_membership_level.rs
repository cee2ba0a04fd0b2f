//! Association between a user and their (at most one) membership level.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_membership_levels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub membership_level_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::membership_level::Entity",
        from = "Column::MembershipLevelId",
        to = "super::membership_level::Column::Id"
    )]
    MembershipLevel,
}

impl Related<super::membership_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
