//! Database operations for station instructors.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::instructor;
use crate::error::AppResult;

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    station_id: Uuid,
) -> Result<instructor::Model, DbErr> {
    let now = Utc::now();

    let model = instructor::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        station_id: Set(station_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model.insert(conn).await
}

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    station_id: Uuid,
) -> AppResult<Option<instructor::Model>> {
    let result = instructor::Entity::find()
        .filter(instructor::Column::UserId.eq(user_id))
        .filter(instructor::Column::StationId.eq(station_id))
        .one(conn)
        .await?;

    Ok(result)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, row: instructor::Model) -> AppResult<()> {
    row.delete(conn).await?;
    Ok(())
}
