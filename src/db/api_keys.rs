//! Database operations for API keys.
//!
//! Revocation is a soft delete; every lookup here excludes revoked rows.

use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::entity::api_key;
use crate::error::AppResult;

/// Insert a new API key row.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    name: &str,
    key_hash: &str,
    expires_at: Option<DateTime<Utc>>,
    created_by: Uuid,
) -> AppResult<api_key::Model> {
    let now = Utc::now();

    let model = api_key::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(name.to_string()),
        key_hash: Set(key_hash.to_string()),
        is_active: Set(true),
        expires_at: Set(expires_at),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };

    let inserted = model.insert(conn).await?;
    Ok(inserted)
}

/// Find a live key by primary key.
pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<api_key::Model>> {
    let result = api_key::Entity::find_by_id(id)
        .filter(api_key::Column::DeletedAt.is_null())
        .one(conn)
        .await?;

    Ok(result)
}

/// Find a live key by secret hash.
pub async fn find_by_hash<C: ConnectionTrait>(
    conn: &C,
    key_hash: &str,
) -> AppResult<Option<api_key::Model>> {
    let result = api_key::Entity::find()
        .filter(api_key::Column::KeyHash.eq(key_hash))
        .filter(api_key::Column::DeletedAt.is_null())
        .one(conn)
        .await?;

    Ok(result)
}

/// All live keys for a user, newest first.
pub async fn list_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Vec<api_key::Model>> {
    let keys = api_key::Entity::find()
        .filter(api_key::Column::UserId.eq(user_id))
        .filter(api_key::Column::DeletedAt.is_null())
        .order_by_desc(api_key::Column::CreatedAt)
        .all(conn)
        .await?;

    Ok(keys)
}

/// Soft-delete a key. There is no restore path.
pub async fn soft_delete<C: ConnectionTrait>(conn: &C, key: api_key::Model) -> AppResult<()> {
    let now = Utc::now();
    let mut active: api_key::ActiveModel = key.into();
    active.deleted_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(conn).await?;

    Ok(())
}
