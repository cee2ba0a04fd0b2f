//! Database operations for badges.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{badge, station};
use crate::error::AppResult;

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    description: Option<&str>,
    station_id: Uuid,
) -> Result<badge::Model, DbErr> {
    let now = Utc::now();

    let model = badge::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(description.map(str::to_owned)),
        station_id: Set(station_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model.insert(conn).await
}

/// Find a badge joined with its station.
pub async fn find_with_station<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<(badge::Model, Option<station::Model>)>> {
    let result = badge::Entity::find_by_id(id)
        .find_also_related(station::Entity)
        .one(conn)
        .await?;

    Ok(result)
}

pub async fn list_with_stations<C: ConnectionTrait>(
    conn: &C,
) -> AppResult<Vec<(badge::Model, Option<station::Model>)>> {
    let rows = badge::Entity::find()
        .find_also_related(station::Entity)
        .order_by_asc(badge::Column::Name)
        .all(conn)
        .await?;

    Ok(rows)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    mut active: badge::ActiveModel,
) -> Result<badge::Model, DbErr> {
    active.updated_at = Set(Utc::now());
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, badge: badge::Model) -> AppResult<()> {
    badge.delete(conn).await?;
    Ok(())
}
