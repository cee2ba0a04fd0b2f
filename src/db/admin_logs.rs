//! Database operations for the append-only audit log.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{admin_log, user};
use crate::error::AppResult;

/// Append one audit entry. Callers pass the transaction handle of the
/// mutation being audited so both commit or roll back together.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    log: &str,
) -> AppResult<admin_log::Model> {
    let model = admin_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        log: Set(log.to_string()),
        created_at: Set(Utc::now()),
    };

    let inserted = model.insert(conn).await?;
    Ok(inserted)
}

/// One page of entries in creation order, each with its acting user.
pub async fn page(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> AppResult<(Vec<(admin_log::Model, Option<user::Model>)>, u64)> {
    let paginator = admin_log::Entity::find()
        .find_also_related(user::Entity)
        .order_by_asc(admin_log::Column::CreatedAt)
        .paginate(db, per_page);

    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok((rows, total))
}

/// Number of entries written. Used by the test suites to assert atomicity.
pub async fn count<C: ConnectionTrait>(conn: &C) -> AppResult<u64> {
    let total = admin_log::Entity::find().count(conn).await?;
    Ok(total)
}
