//! Database operations for stations.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{instructor, station, user};
use crate::error::AppResult;

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    description: Option<&str>,
    image_url: Option<&str>,
) -> Result<station::Model, DbErr> {
    let now = Utc::now();

    let model = station::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(description.map(str::to_owned)),
        image_url: Set(image_url.map(str::to_owned)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<station::Model>> {
    let result = station::Entity::find_by_id(id).one(conn).await?;
    Ok(result)
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<station::Model>> {
    let stations = station::Entity::find()
        .order_by_asc(station::Column::Name)
        .all(conn)
        .await?;

    Ok(stations)
}

/// Instructor rows for a station, each joined with the teaching user.
pub async fn instructors_with_users<C: ConnectionTrait>(
    conn: &C,
    station_id: Uuid,
) -> AppResult<Vec<(instructor::Model, Option<user::Model>)>> {
    let rows = instructor::Entity::find()
        .filter(instructor::Column::StationId.eq(station_id))
        .find_also_related(user::Entity)
        .all(conn)
        .await?;

    Ok(rows)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    mut active: station::ActiveModel,
) -> Result<station::Model, DbErr> {
    active.updated_at = Set(Utc::now());
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, station: station::Model) -> AppResult<()> {
    station.delete(conn).await?;
    Ok(())
}
