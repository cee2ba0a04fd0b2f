//! Database operations for donations.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{donation, user};
use crate::error::AppResult;

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    user_id: Option<Uuid>,
    amount_in_cents: i64,
    purpose: Option<&str>,
    notes: Option<&str>,
) -> AppResult<donation::Model> {
    let now = Utc::now();

    let model = donation::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        amount_in_cents: Set(amount_in_cents),
        purpose: Set(purpose.map(str::to_owned)),
        notes: Set(notes.map(str::to_owned)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model.insert(conn).await?;
    Ok(inserted)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<donation::Model>> {
    let result = donation::Entity::find_by_id(id).one(conn).await?;
    Ok(result)
}

/// All donations, newest first, each with the donating user when known.
pub async fn list_with_users<C: ConnectionTrait>(
    conn: &C,
) -> AppResult<Vec<(donation::Model, Option<user::Model>)>> {
    let rows = donation::Entity::find()
        .find_also_related(user::Entity)
        .order_by_desc(donation::Column::CreatedAt)
        .all(conn)
        .await?;

    Ok(rows)
}

pub async fn list_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Vec<donation::Model>> {
    let rows = donation::Entity::find()
        .filter(donation::Column::UserId.eq(user_id))
        .order_by_desc(donation::Column::CreatedAt)
        .all(conn)
        .await?;

    Ok(rows)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, donation: donation::Model) -> AppResult<()> {
    donation.delete(conn).await?;
    Ok(())
}
