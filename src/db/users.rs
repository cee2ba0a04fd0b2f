//! Database operations for users and their role/instructor/membership data.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{instructor, membership_level, user, user_membership_level, user_role};
use crate::error::AppResult;

/// Find a user by primary key.
pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<user::Model>> {
    let result = user::Entity::find_by_id(id)
        .filter(user::Column::DeletedAt.is_null())
        .one(conn)
        .await?;

    Ok(result)
}

/// Insert a new user row. The id comes from the verified token subject, not
/// a generated value.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<user::Model, DbErr> {
    let now = Utc::now();

    let model = user::ActiveModel {
        id: Set(id),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        email: Set(email.to_string()),
        phone: Set(None),
        email_visible: Set(None),
        phone_visible: Set(None),
        postal_code: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };

    model.insert(conn).await
}

/// Role grants for a user.
pub async fn roles_for<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Vec<user_role::Model>> {
    let roles = user_role::Entity::find()
        .filter(user_role::Column::UserId.eq(user_id))
        .all(conn)
        .await?;

    Ok(roles)
}

/// Ids of every station the user instructs for.
pub async fn instructor_station_ids<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Vec<Uuid>> {
    let rows = instructor::Entity::find()
        .filter(instructor::Column::UserId.eq(user_id))
        .all(conn)
        .await?;

    Ok(rows.into_iter().map(|r| r.station_id).collect())
}

/// The user's membership level, if any.
pub async fn membership_level_for<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Option<membership_level::Model>> {
    let result = user_membership_level::Entity::find()
        .filter(user_membership_level::Column::UserId.eq(user_id))
        .find_also_related(membership_level::Entity)
        .one(conn)
        .await?;

    Ok(result.and_then(|(_, level)| level))
}

/// Apply a profile update and bump updated_at.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    mut active: user::ActiveModel,
) -> AppResult<user::Model> {
    active.updated_at = Set(Utc::now());
    let updated = active.update(conn).await?;
    Ok(updated)
}

/// Paginated user listing with an optional name/email search.
///
/// Each whitespace-separated term matches first or last name; the whole
/// query additionally matches the email column.
pub async fn search_page(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
    per_page: u64,
) -> AppResult<(Vec<user::Model>, u64)> {
    let mut query = user::Entity::find().filter(user::Column::DeletedAt.is_null());

    if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
        let mut cond = Condition::any().add(user::Column::Email.contains(search));
        for term in search.split_whitespace() {
            cond = cond
                .add(user::Column::FirstName.contains(term))
                .add(user::Column::LastName.contains(term));
        }
        query = query.filter(cond);
    }

    let paginator = query
        .order_by_asc(user::Column::CreatedAt)
        .paginate(db, per_page);

    let total = paginator.num_items().await?;
    let users = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok((users, total))
}
